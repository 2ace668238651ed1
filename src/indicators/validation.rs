//! Input validation for the crossover computation.

use crate::error::{InvalidPriceReason, PerformanceError};
use crate::models::market::PricePoint;
use crate::models::performance::CrossoverParams;

/// The long window must fit in the series at least once.
pub fn validate_series_length(len: usize, params: &CrossoverParams) -> Result<(), PerformanceError> {
    if len < params.long_window {
        return Err(PerformanceError::InsufficientData {
            required: params.long_window,
            actual: len,
        });
    }
    Ok(())
}

/// Timestamps must be strictly increasing; the series is never re-sorted.
pub fn validate_ordering(series: &[PricePoint]) -> Result<(), PerformanceError> {
    match series
        .windows(2)
        .position(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        Some(previous) => Err(PerformanceError::InvalidPrice {
            index: previous + 1,
            reason: InvalidPriceReason::NonIncreasingTimestamp,
        }),
        None => Ok(()),
    }
}

/// A close used as a return denominator must be strictly positive.
pub fn validate_denominator(index: usize, close: f64) -> Result<(), PerformanceError> {
    if close <= 0.0 {
        return Err(PerformanceError::InvalidPrice {
            index,
            reason: InvalidPriceReason::NonPositiveDenominator(close),
        });
    }
    Ok(())
}
