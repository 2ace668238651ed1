//! Crossover performance engine: rolling means, signals, lagged returns.

use std::time::Instant;

use tracing::debug;

use crate::error::PerformanceError;
use crate::indicators::trend::calculate_rolling_means;
use crate::indicators::validation::validate_ordering;
use crate::models::market::PricePoint;
use crate::models::performance::{CrossoverParams, PerformanceLedger, PerformanceReport};
use crate::signals::crossover::generate_signals;
use crate::signals::performance::PerformanceAggregator;

pub struct CrossoverEngine;

impl CrossoverEngine {
    /// Run the full pipeline and keep every intermediate column.
    pub fn ledger(
        series: &[PricePoint],
        params: &CrossoverParams,
    ) -> Result<PerformanceLedger, PerformanceError> {
        let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
        let means = calculate_rolling_means(&closes, params)?;
        validate_ordering(series)?;
        let signals = generate_signals(&means);
        let returns = PerformanceAggregator::returns(&closes, &signals)?;
        let report = PerformanceAggregator::summarize(&signals, &returns);

        debug!(
            len = series.len(),
            short_window = params.short_window,
            long_window = params.long_window,
            buy_signals = report.buy_signals,
            sell_signals = report.sell_signals,
            total_return = report.total_return,
            "CrossoverEngine: computed performance over {} prices",
            series.len()
        );

        Ok(PerformanceLedger {
            means,
            signals,
            positions: returns.positions,
            daily_returns: returns.daily_returns,
            strategy_returns: returns.strategy_returns,
            report,
        })
    }

    pub fn evaluate(
        series: &[PricePoint],
        params: &CrossoverParams,
    ) -> Result<PerformanceReport, PerformanceError> {
        Self::ledger(series, params).map(PerformanceLedger::into_report)
    }

    /// Like `evaluate`, but refuses to start once `deadline` has passed.
    /// A computation that has started always runs to completion.
    pub fn evaluate_before(
        series: &[PricePoint],
        params: &CrossoverParams,
        deadline: Instant,
    ) -> Result<PerformanceReport, PerformanceError> {
        if Instant::now() >= deadline {
            debug!(len = series.len(), "CrossoverEngine: deadline passed, skipping computation");
            return Err(PerformanceError::DeadlineExceeded);
        }
        Self::evaluate(series, params)
    }
}

/// Compute the crossover performance report for an ordered price series.
pub fn compute_performance(
    series: &[PricePoint],
    params: &CrossoverParams,
) -> Result<PerformanceReport, PerformanceError> {
    CrossoverEngine::evaluate(series, params)
}

pub fn compute_performance_ledger(
    series: &[PricePoint],
    params: &CrossoverParams,
) -> Result<PerformanceLedger, PerformanceError> {
    CrossoverEngine::ledger(series, params)
}

pub fn compute_performance_before(
    series: &[PricePoint],
    params: &CrossoverParams,
    deadline: Instant,
) -> Result<PerformanceReport, PerformanceError> {
    CrossoverEngine::evaluate_before(series, params, deadline)
}
