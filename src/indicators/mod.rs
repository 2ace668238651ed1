pub mod validation;

pub mod trend;

pub use trend::{calculate_rolling_means, calculate_sma_series, RollingMean};
pub use validation::*;
