//! Lagged-position performance accumulation.
//!
//! The signal computed at bar `i - 1` sets the position held over the return
//! realized from `i - 1` to `i`. A bar's own signal never weights its own return.

use crate::error::PerformanceError;
use crate::indicators::validation::validate_denominator;
use crate::models::performance::{position_weight, PerformanceReport, Signal};
use crate::signals::crossover::count_signals;

/// Per-index return columns. Index 0 is always `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub positions: Vec<Option<f64>>,
    pub daily_returns: Vec<Option<f64>>,
    pub strategy_returns: Vec<Option<f64>>,
}

impl ReturnSeries {
    /// Sum of strategy returns; undefined entries contribute nothing.
    pub fn total_return(&self) -> f64 {
        self.strategy_returns.iter().flatten().sum()
    }
}

pub struct PerformanceAggregator;

impl PerformanceAggregator {
    /// Build position, single-step return and strategy return columns.
    ///
    /// Fails on the first close at or below zero that would divide a return.
    pub fn returns(
        closes: &[f64],
        signals: &[Option<Signal>],
    ) -> Result<ReturnSeries, PerformanceError> {
        let len = closes.len();
        let mut positions = Vec::with_capacity(len);
        let mut daily_returns = Vec::with_capacity(len);
        let mut strategy_returns = Vec::with_capacity(len);

        if len > 0 {
            positions.push(None);
            daily_returns.push(None);
            strategy_returns.push(None);
        }

        for i in 1..len {
            let previous = closes[i - 1];
            validate_denominator(i - 1, previous)?;

            let position = position_weight(signals.get(i - 1).copied().flatten());
            let daily_return = (closes[i] - previous) / previous;

            positions.push(Some(position));
            daily_returns.push(Some(daily_return));
            strategy_returns.push(Some(daily_return * position));
        }

        Ok(ReturnSeries {
            positions,
            daily_returns,
            strategy_returns,
        })
    }

    pub fn summarize(signals: &[Option<Signal>], returns: &ReturnSeries) -> PerformanceReport {
        let (buy_signals, sell_signals) = count_signals(signals);
        PerformanceReport {
            total_return: returns.total_return(),
            number_of_trades: buy_signals + sell_signals,
            buy_signals,
            sell_signals,
        }
    }

    pub fn aggregate(
        closes: &[f64],
        signals: &[Option<Signal>],
    ) -> Result<PerformanceReport, PerformanceError> {
        let returns = Self::returns(closes, signals)?;
        Ok(Self::summarize(signals, &returns))
    }
}
