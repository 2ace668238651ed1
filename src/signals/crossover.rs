//! Moving-average crossover classification.

use crate::models::performance::{RollingMeans, Signal};

/// Classify one index. `Long` only when the short mean is strictly above the long mean.
pub fn classify(means: &RollingMeans) -> Option<Signal> {
    let (short_ma, long_ma) = means.both()?;
    if short_ma > long_ma {
        Some(Signal::Long)
    } else {
        Some(Signal::FlatOrShort)
    }
}

/// One entry per index; `None` where either mean is still undefined.
pub fn generate_signals(means: &[RollingMeans]) -> Vec<Option<Signal>> {
    means.iter().map(classify).collect()
}

/// Count of (`Long`, `FlatOrShort`) among the defined signals.
pub fn count_signals(signals: &[Option<Signal>]) -> (usize, usize) {
    signals
        .iter()
        .flatten()
        .fold((0, 0), |(buys, sells), signal| match signal {
            Signal::Long => (buys + 1, sells),
            Signal::FlatOrShort => (buys, sells + 1),
        })
}
