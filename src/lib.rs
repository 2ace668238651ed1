//! Moving-average crossover signal and strategy performance over OHLCV series.
//!
//! The core ([`signals::compute_performance`]) is a pure batch computation over
//! an ordered price series. Everything else in the crate (configuration,
//! logging, metrics, the HTTP API and the record repository) is the shell that
//! supplies that series and returns the report.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{InvalidPriceReason, PerformanceError};
pub use models::{CrossoverParams, PerformanceLedger, PerformanceReport, PricePoint, Signal};
pub use signals::{compute_performance, compute_performance_before, compute_performance_ledger};
