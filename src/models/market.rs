//! Market data records handed to the performance core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored OHLCV bar for an instrument, keyed by its `datetime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerData {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub instrument: String,
}

impl TickerData {
    pub fn price_point(&self) -> PricePoint {
        PricePoint::new(self.datetime, self.close)
    }
}

/// A single (timestamp, close) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }
}

impl From<&TickerData> for PricePoint {
    fn from(record: &TickerData) -> Self {
        record.price_point()
    }
}

/// Project stored records onto the price series the core consumes.
pub fn price_series(records: &[TickerData]) -> Vec<PricePoint> {
    records.iter().map(PricePoint::from).collect()
}
