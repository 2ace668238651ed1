//! Unit tests for the rolling-mean window aggregator

use crate::common_fixtures::{assert_close, random_walk};
use tickersignal::error::PerformanceError;
use tickersignal::indicators::trend::{calculate_rolling_means, calculate_sma_series, RollingMean};
use tickersignal::models::CrossoverParams;

const CLOSES: [f64; 5] = [100.0, 105.0, 102.0, 108.0, 110.0];

#[test]
fn test_rolling_means_at_last_index() {
    let means = calculate_rolling_means(&CLOSES, &CrossoverParams::new(2, 5)).unwrap();
    assert_eq!(means.len(), CLOSES.len());
    assert_eq!(means[4].short_ma, Some(109.0));
    assert_eq!(means[4].long_ma, Some(105.0));
}

#[test]
fn test_means_undefined_until_window_full() {
    let means = calculate_rolling_means(&CLOSES, &CrossoverParams::new(2, 5)).unwrap();
    assert_eq!(means[0].short_ma, None);
    assert_eq!(means[1].short_ma, Some(102.5));
    for m in &means[..4] {
        assert_eq!(m.long_ma, None);
    }
}

#[test]
fn test_insufficient_data() {
    let result = calculate_rolling_means(&CLOSES, &CrossoverParams::new(2, 6));
    assert_eq!(
        result,
        Err(PerformanceError::InsufficientData {
            required: 6,
            actual: 5
        })
    );
}

#[test]
fn test_invalid_windows() {
    for (short, long) in [(0, 5), (5, 5), (6, 5)] {
        let result = calculate_rolling_means(&CLOSES, &CrossoverParams::new(short, long));
        assert!(
            matches!(result, Err(PerformanceError::InvalidWindow { .. })),
            "windows ({short}, {long}) should be rejected"
        );
    }
}

#[test]
fn test_running_sum_matches_recomputed_mean() {
    let closes = random_walk(500);
    let period = 30;
    let series = calculate_sma_series(&closes, period);

    for (i, value) in series.iter().enumerate() {
        if i + 1 < period {
            assert_eq!(*value, None);
        } else {
            let window = &closes[i + 1 - period..=i];
            let expected = window.iter().sum::<f64>() / period as f64;
            assert_close(value.unwrap(), expected);
        }
    }
}

#[test]
fn test_streaming_matches_batch() {
    let closes = random_walk(200);
    let batch = calculate_sma_series(&closes, 7);
    let mut streaming = RollingMean::new(7).unwrap();
    let streamed: Vec<Option<f64>> = closes.iter().map(|&c| streaming.next(c)).collect();
    assert_eq!(batch, streamed);
}

#[test]
fn test_zero_period_series_is_undefined() {
    assert_eq!(calculate_sma_series(&CLOSES, 0), vec![None; CLOSES.len()]);
}

#[test]
fn test_constant_window_mean_is_exact() {
    for constant in [0.1, 57.3, 0.7] {
        let series = calculate_sma_series(&[constant; 300], 20);
        assert!(series[19..].iter().all(|m| *m == Some(constant)));
    }
}

#[test]
fn test_long_run_does_not_drift() {
    let closes = random_walk(5000);
    let period = 100;
    let series = calculate_sma_series(&closes, period);
    let last = closes.len() - 1;
    let expected = closes[last + 1 - period..].iter().sum::<f64>() / period as f64;
    assert!((series[last].unwrap() - expected).abs() < 1e-10);
}
