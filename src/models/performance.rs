//! Crossover signal and performance data models.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 100;

/// Window lengths for the short and long moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl CrossoverParams {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Replace either window with a request-level override.
    pub fn with_overrides(self, short_window: Option<usize>, long_window: Option<usize>) -> Self {
        Self {
            short_window: short_window.unwrap_or(self.short_window),
            long_window: long_window.unwrap_or(self.long_window),
        }
    }
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self::new(DEFAULT_SHORT_WINDOW, DEFAULT_LONG_WINDOW)
    }
}

/// Short and long rolling means at one index. `None` until the window is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingMeans {
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
}

impl RollingMeans {
    pub fn both(&self) -> Option<(f64, f64)> {
        Some((self.short_ma?, self.long_ma?))
    }
}

/// Crossover classification. Equal means count as `FlatOrShort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Long,
    FlatOrShort,
}

impl Signal {
    /// Position weight applied to the following bar's return.
    pub fn weight(self) -> f64 {
        match self {
            Signal::Long => 1.0,
            Signal::FlatOrShort => -1.0,
        }
    }
}

/// Weight of a possibly-undefined signal; undefined means no position.
pub fn position_weight(signal: Option<Signal>) -> f64 {
    signal.map_or(0.0, Signal::weight)
}

/// Summary of one crossover computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_return: f64,
    pub number_of_trades: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
}

/// Every per-index column produced while computing a report.
///
/// All vectors have one entry per input price. Index 0 of `positions`,
/// `daily_returns` and `strategy_returns` is always `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceLedger {
    pub means: Vec<RollingMeans>,
    pub signals: Vec<Option<Signal>>,
    pub positions: Vec<Option<f64>>,
    pub daily_returns: Vec<Option<f64>>,
    pub strategy_returns: Vec<Option<f64>>,
    pub report: PerformanceReport,
}

impl PerformanceLedger {
    pub fn into_report(self) -> PerformanceReport {
        self.report
    }
}
