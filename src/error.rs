//! Errors raised by the crossover performance computation.

use std::fmt;
use thiserror::Error;

/// Why a price was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidPriceReason {
    /// A close of zero or below would be used as a return denominator.
    NonPositiveDenominator(f64),
    /// The timestamp does not strictly follow the previous one.
    NonIncreasingTimestamp,
}

impl fmt::Display for InvalidPriceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPriceReason::NonPositiveDenominator(close) => {
                write!(f, "close {} cannot be used as a return denominator", close)
            }
            InvalidPriceReason::NonIncreasingTimestamp => {
                write!(f, "timestamp is not strictly after the previous one")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error("insufficient data: {required} prices required, {actual} supplied")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid price at index {index}: {reason}")]
    InvalidPrice {
        index: usize,
        reason: InvalidPriceReason,
    },

    #[error(
        "invalid windows: short_window ({short_window}) must be positive and below long_window ({long_window})"
    )]
    InvalidWindow {
        short_window: usize,
        long_window: usize,
    },

    #[error("deadline exceeded before the computation started")]
    DeadlineExceeded,
}

impl PerformanceError {
    /// Stable machine-readable name, used in API error bodies and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PerformanceError::InsufficientData { .. } => "insufficient_data",
            PerformanceError::InvalidPrice { .. } => "invalid_price",
            PerformanceError::InvalidWindow { .. } => "invalid_window",
            PerformanceError::DeadlineExceeded => "deadline_exceeded",
        }
    }
}
