//! Signal evaluation interfaces.

pub mod crossover;
pub mod engine;
pub mod performance;

pub use crossover::*;
pub use engine::{
    compute_performance, compute_performance_before, compute_performance_ledger, CrossoverEngine,
};
pub use performance::{PerformanceAggregator, ReturnSeries};
