//! SMA (Simple Moving Average) indicator

use std::collections::VecDeque;

use crate::error::PerformanceError;
use crate::indicators::validation::validate_series_length;
use crate::models::performance::{CrossoverParams, RollingMeans};

/// Streaming simple moving average backed by a compensated running sum.
///
/// Each `next` call is O(1): the entering value is added to the sum and,
/// once the window is full, the value leaving the window is subtracted.
/// Both updates go through Neumaier summation so rounding error does not
/// accumulate over long series. A window holding a single repeated value
/// yields that value exactly.
#[derive(Debug, Clone)]
pub struct RollingMean {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
    compensation: f64,
    repeated: usize,
}

impl RollingMean {
    /// Returns `None` for a zero-length window.
    pub fn new(period: usize) -> Option<Self> {
        if period == 0 {
            return None;
        }
        Some(Self {
            period,
            window: VecDeque::with_capacity(period),
            sum: 0.0,
            compensation: 0.0,
            repeated: 0,
        })
    }

    /// True once `period` values have been seen.
    pub fn is_ready(&self) -> bool {
        self.window.len() == self.period
    }

    /// Push the next value and return the mean of the trailing window, if full.
    pub fn next(&mut self, value: f64) -> Option<f64> {
        if self.window.len() == self.period {
            if let Some(leaving) = self.window.pop_front() {
                self.accumulate(-leaving);
            }
        }

        // length of the run of equal values ending at the newest one
        self.repeated = match self.window.back() {
            Some(&previous) if previous == value => self.repeated + 1,
            _ => 1,
        };
        self.window.push_back(value);
        self.accumulate(value);

        if !self.is_ready() {
            return None;
        }
        if self.repeated >= self.period {
            return Some(value);
        }
        Some((self.sum + self.compensation) / self.period as f64)
    }

    fn accumulate(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }
}

/// Trailing mean at every index; `None` while fewer than `period` values are available.
pub fn calculate_sma_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    match RollingMean::new(period) {
        Some(mut mean) => closes.iter().map(|&close| mean.next(close)).collect(),
        None => vec![None; closes.len()],
    }
}

/// Short and long rolling means for every close, in a single pass.
///
/// Both windows must be positive with the short one strictly shorter, and the
/// long window must fit in `closes` at least once.
pub fn calculate_rolling_means(
    closes: &[f64],
    params: &CrossoverParams,
) -> Result<Vec<RollingMeans>, PerformanceError> {
    let (mut short, mut long) = window_pair(params)?;
    validate_series_length(closes.len(), params)?;

    Ok(closes
        .iter()
        .map(|&close| RollingMeans {
            short_ma: short.next(close),
            long_ma: long.next(close),
        })
        .collect())
}

fn window_pair(params: &CrossoverParams) -> Result<(RollingMean, RollingMean), PerformanceError> {
    match (
        RollingMean::new(params.short_window),
        RollingMean::new(params.long_window),
    ) {
        (Some(short), Some(long)) if params.short_window < params.long_window => Ok((short, long)),
        _ => Err(PerformanceError::InvalidWindow {
            short_window: params.short_window,
            long_window: params.long_window,
        }),
    }
}
