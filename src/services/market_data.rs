//! Market data access handed to request handlers as an injected capability.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::market::TickerData;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("a record already exists at {0}")]
    Conflict(DateTime<Utc>),
}

/// Storage of OHLCV records. Records are keyed by their `datetime`.
#[async_trait]
pub trait TickerRepository: Send + Sync {
    /// Store a record and return it as stored.
    async fn insert(&self, record: TickerData) -> Result<TickerData, RepositoryError>;

    /// Every stored record, ordered by datetime.
    async fn list(&self) -> Result<Vec<TickerData>, RepositoryError>;

    /// Records for one instrument, ordered by datetime.
    async fn series_for(&self, instrument: &str) -> Result<Vec<TickerData>, RepositoryError>;
}

/// Process-local repository, used by the API server and tests.
#[derive(Default)]
pub struct InMemoryTickerRepository {
    records: RwLock<BTreeMap<DateTime<Utc>, TickerData>>,
}

impl InMemoryTickerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = TickerData>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().map(|r| (r.datetime, r)).collect()),
        }
    }
}

#[async_trait]
impl TickerRepository for InMemoryTickerRepository {
    async fn insert(&self, record: TickerData) -> Result<TickerData, RepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.datetime) {
            return Err(RepositoryError::Conflict(record.datetime));
        }
        records.insert(record.datetime, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<TickerData>, RepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn series_for(&self, instrument: &str) -> Result<Vec<TickerData>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.instrument == instrument)
            .cloned()
            .collect())
    }
}
