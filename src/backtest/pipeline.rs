//! The shared pair pipeline: align → filter → signal → simulate.
//!
//! Both the scanner and the production runner call [`run_pair`]; they differ
//! only in the [`Benchmark`] they pass and in whether they keep the full
//! [`PairBacktest`] or just its [`BacktestResult`] summary.

use super::align::align;
use super::config::PipelineConfig;
use super::signal::{generate_signals, SignalRecord};
use super::simulator::{simulate, Benchmark, PositionRecord, SimulationParams};
use crate::error::PairsError;
use crate::math::{HedgeEstimate, KalmanHedgeRatio};
use crate::types::{AlignedPairSeries, PriceSeries};
use tracing::debug;

/// Full per-step output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PairBacktest {
    pub series: AlignedPairSeries,
    pub estimates: Vec<HedgeEstimate>,
    pub signals: Vec<SignalRecord>,
    pub positions: Vec<PositionRecord>,
    pub benchmark: Benchmark,
    pub leverage: f64,
}

/// Aggregate outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub cumulative_strategy_curve: Vec<f64>,
    pub cumulative_benchmark_curve: Vec<f64>,
    pub total_strategy_return_pct: f64,
    pub total_benchmark_return_pct: f64,
    pub final_z_score: Option<f64>,
    pub final_hedge_ratio: f64,
}

impl BacktestResult {
    /// Strategy return minus benchmark return, in percent.
    pub fn alpha_pct(&self) -> f64 {
        self.total_strategy_return_pct - self.total_benchmark_return_pct
    }
}

impl PairBacktest {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn hedge_ratios(&self) -> impl Iterator<Item = f64> + '_ {
        self.signals.iter().map(|s| s.hedge_ratio)
    }

    pub fn z_scores(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.signals.iter().map(|s| s.z_score)
    }

    pub fn strategy_curve(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().map(|p| p.cumulative_strategy)
    }

    pub fn benchmark_curve(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().map(|p| p.cumulative_benchmark)
    }

    pub fn final_z_score(&self) -> Option<f64> {
        self.signals.last().and_then(|s| s.z_score)
    }

    pub fn final_hedge_ratio(&self) -> f64 {
        self.signals.last().map(|s| s.hedge_ratio).unwrap_or(f64::NAN)
    }

    pub fn summary(&self) -> BacktestResult {
        let final_strategy = self.positions.last().map_or(1.0, |p| p.cumulative_strategy);
        let final_benchmark = self.positions.last().map_or(1.0, |p| p.cumulative_benchmark);

        BacktestResult {
            cumulative_strategy_curve: self.strategy_curve().collect(),
            cumulative_benchmark_curve: self.benchmark_curve().collect(),
            total_strategy_return_pct: (final_strategy - 1.0) * 100.0,
            total_benchmark_return_pct: (final_benchmark - 1.0) * 100.0,
            final_z_score: self.final_z_score(),
            final_hedge_ratio: self.final_hedge_ratio(),
        }
    }
}

/// Run the pipeline over an already aligned series.
pub fn run_aligned(
    series: AlignedPairSeries,
    config: &PipelineConfig,
    benchmark: Benchmark,
) -> PairBacktest {
    let filter = KalmanHedgeRatio::new(config.kalman);
    let estimates = filter.filter(series.points().iter().map(|p| (p.price_a, p.price_b)));

    let hedge_ratios: Vec<f64> = estimates.iter().map(|e| e.hedge_ratio).collect();
    let signals = generate_signals(&series, &hedge_ratios, config.z_window);

    let params = SimulationParams {
        leverage: config.leverage,
        loss_floor: config.loss_floor,
        benchmark,
    };
    let positions = simulate(&series, &signals, &params);

    debug!(
        pair = %series.pair_label(),
        observations = series.len(),
        final_beta = hedge_ratios.last().copied().unwrap_or(f64::NAN),
        "Pipeline run complete"
    );

    PairBacktest {
        series,
        estimates,
        signals,
        positions,
        benchmark,
        leverage: config.leverage,
    }
}

/// Align two price series and run the pipeline.
///
/// # Errors
/// [`PairsError::InsufficientData`] when the aligned history is shorter than
/// `config.min_observations`.
pub fn run_pair(
    series_a: &PriceSeries,
    series_b: &PriceSeries,
    config: &PipelineConfig,
    benchmark: Benchmark,
) -> Result<PairBacktest, PairsError> {
    let aligned = align(series_a, series_b, config.min_observations)?;
    Ok(run_aligned(aligned, config, benchmark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::signal::Position;
    use crate::types::PricePoint;
    use chrono::{Duration, NaiveDate};

    const SPIKE_STEP: usize = 110;

    fn scenario(len: usize, spike: Option<usize>) -> (PriceSeries, PriceSeries) {
        let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let a = (0..len)
            .map(|i| {
                let mut price = 100.0 + (i % 5) as f64;
                if Some(i) == spike {
                    price += 30.0;
                }
                PricePoint::new(base + Duration::days(i as i64), price)
            })
            .collect();
        let b = (0..len)
            .map(|i| PricePoint::new(base + Duration::days(i as i64), 100.0))
            .collect();
        (PriceSeries::new("A", a), PriceSeries::new("B", b))
    }

    #[test]
    fn test_hedge_ratio_converges_near_one() {
        let (a, b) = scenario(120, None);
        let run = run_pair(&a, &b, &PipelineConfig::default(), Benchmark::EqualWeight).unwrap();

        assert_eq!(run.estimates[0].prior_mean, 0.0);
        for (t, beta) in run.hedge_ratios().enumerate().take(100).skip(5) {
            assert!((beta - 1.0).abs() < 0.05, "step {}: beta {} not near 1.0", t, beta);
        }
    }

    #[test]
    fn test_spike_flips_next_step_position() {
        let (a, b) = scenario(120, Some(SPIKE_STEP));
        let run = run_pair(&a, &b, &PipelineConfig::default(), Benchmark::EqualWeight).unwrap();

        let z = run.signals[SPIKE_STEP].z_score.unwrap();
        assert!(z > 2.0, "spike z-score too small: {}", z);
        assert_eq!(run.positions[SPIKE_STEP].position, Some(Position::Short));
        assert_eq!(run.positions[SPIKE_STEP + 1].held_position, Some(Position::Short));
    }

    #[test]
    fn test_z_score_undefined_for_first_19_steps() {
        let (a, b) = scenario(120, None);
        let run = run_pair(&a, &b, &PipelineConfig::default(), Benchmark::EqualWeight).unwrap();

        let defined: Vec<bool> = run.z_scores().map(|z| z.is_some()).collect();
        assert!(defined[..19].iter().all(|d| !d));
        assert!(defined[19..].iter().all(|d| *d));
    }

    #[test]
    fn test_runs_are_bit_identical() {
        let (a, b) = scenario(150, Some(120));
        let config = PipelineConfig::default();
        let first = run_pair(&a, &b, &config, Benchmark::EqualWeight).unwrap().summary();
        let second = run_pair(&a, &b, &config, Benchmark::EqualWeight).unwrap().summary();

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(
            bits(&first.cumulative_strategy_curve),
            bits(&second.cumulative_strategy_curve)
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_percentages() {
        let (a, b) = scenario(120, Some(SPIKE_STEP));
        let run = run_pair(&a, &b, &PipelineConfig::default(), Benchmark::BuyAndHoldA).unwrap();
        let summary = run.summary();

        let last = run.positions.last().unwrap();
        assert_eq!(summary.total_strategy_return_pct, (last.cumulative_strategy - 1.0) * 100.0);
        assert_eq!(summary.cumulative_strategy_curve.len(), 120);
        // Buy and hold of A: 119 % 5 = 4, so A ends at 104
        assert!((summary.total_benchmark_return_pct - 4.0).abs() < 1e-9);
        assert_eq!(summary.final_hedge_ratio, run.signals[119].hedge_ratio);
        assert!((summary.alpha_pct() - (summary.total_strategy_return_pct - 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_short_history_is_rejected() {
        let (a, b) = scenario(99, None);
        let err = run_pair(&a, &b, &PipelineConfig::default(), Benchmark::EqualWeight).unwrap_err();
        assert!(matches!(err, PairsError::InsufficientData { actual: 99, .. }));
    }
}
