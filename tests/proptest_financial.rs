//! Property-based tests for the pairs pipeline
//!
//! These tests use proptest to verify invariants across many random inputs,
//! catching edge cases that unit tests might miss.

use chrono::{Duration, NaiveDate};
use kalman_pairs::backtest::{apply_leverage, run_pair, Benchmark, PipelineConfig};
use kalman_pairs::discovery::enumerate_pairs;
use kalman_pairs::math::{population_stats, KalmanHedgeRatio};
use kalman_pairs::types::{PricePoint, PriceSeries};
use proptest::prelude::*;

fn to_series(symbol: &str, prices: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    PriceSeries::new(
        symbol,
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(start + Duration::days(i as i64), *p))
            .collect(),
    )
}

proptest! {
    /// Leveraged return never drops below the floor, whatever the magnitude
    #[test]
    fn leveraged_return_respects_floor(
        raw in -1e6f64..1e6f64,
        leverage in 0.1f64..100.0f64,
    ) {
        let leveraged = apply_leverage(raw, leverage, -0.99);
        prop_assert!(leveraged >= -0.99);
    }

    /// Filter variance stays non-negative at every step
    #[test]
    fn kalman_variance_non_negative(
        obs in prop::collection::vec((1.0f64..1000.0f64, 1.0f64..1000.0f64), 1..200)
    ) {
        let estimates = KalmanHedgeRatio::default().filter(obs);
        for estimate in &estimates {
            prop_assert!(estimate.variance >= 0.0);
            prop_assert!(estimate.hedge_ratio.is_finite());
        }
    }

    /// The first prior is the configured initial mean
    #[test]
    fn kalman_first_prior_is_initial_mean(a in 1.0f64..500.0f64, b in 1.0f64..500.0f64) {
        let estimates = KalmanHedgeRatio::default().filter([(a, b)]);
        prop_assert_eq!(estimates[0].prior_mean, 0.0);
    }

    /// N instruments give N(N-1)/2 pairs, each unordered pair once
    #[test]
    fn pair_count_is_n_choose_2(n in 0usize..40) {
        let items: Vec<usize> = (0..n).collect();
        let pairs = enumerate_pairs(&items);
        prop_assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);

        let mut seen = std::collections::HashSet::new();
        for (a, b) in pairs {
            prop_assert!(a < b);
            prop_assert!(seen.insert((*a, *b)));
        }
    }

    /// Z-score over a non-degenerate window is finite
    #[test]
    fn zscore_is_finite_for_valid_input(
        window in prop::collection::vec(-1000.0f64..1000.0f64, 2..100),
        current in -1000.0f64..1000.0f64,
    ) {
        if let Some(stats) = population_stats(&window) {
            prop_assert!(stats.std_dev >= 0.0);
            if stats.std_dev > 1e-9 {
                let z = (current - stats.mean) / stats.std_dev;
                prop_assert!(z.is_finite());
            }
        }
    }

    /// Same input produces bit-identical output
    #[test]
    fn pipeline_is_deterministic(
        prices_a in prop::collection::vec(10.0f64..200.0f64, 100..160),
        prices_b in prop::collection::vec(10.0f64..200.0f64, 100..160),
    ) {
        let a = to_series("A", &prices_a);
        let b = to_series("B", &prices_b);
        let config = PipelineConfig::default();

        let first = run_pair(&a, &b, &config, Benchmark::EqualWeight).unwrap().summary();
        let second = run_pair(&a, &b, &config, Benchmark::EqualWeight).unwrap().summary();

        prop_assert_eq!(
            first.total_strategy_return_pct.to_bits(),
            second.total_strategy_return_pct.to_bits()
        );
        prop_assert_eq!(first.cumulative_strategy_curve.len(), second.cumulative_strategy_curve.len());
        for (x, y) in first.cumulative_strategy_curve.iter().zip(&second.cumulative_strategy_curve) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    /// Defined z-scores are finite and the warm-up is exactly window - 1 steps
    #[test]
    fn zscore_warm_up_and_finiteness(
        prices_a in prop::collection::vec(10.0f64..200.0f64, 120),
        prices_b in prop::collection::vec(10.0f64..200.0f64, 120),
    ) {
        let a = to_series("A", &prices_a);
        let b = to_series("B", &prices_b);
        let backtest = run_pair(&a, &b, &PipelineConfig::default(), Benchmark::BuyAndHoldA).unwrap();

        let z: Vec<Option<f64>> = backtest.z_scores().collect();
        prop_assert!(z[..19].iter().all(Option::is_none));
        for value in z.iter().flatten() {
            prop_assert!(value.is_finite());
        }
        for leveraged in backtest.positions.iter().filter_map(|p| p.leveraged_return) {
            prop_assert!(leveraged >= -0.99);
        }
    }
}
