//! Shared data models spanning the engine layers.

pub mod market;
pub mod performance;

pub use market::{price_series, PricePoint, TickerData};
pub use performance::{
    position_weight, CrossoverParams, PerformanceLedger, PerformanceReport, RollingMeans, Signal,
    DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW,
};
