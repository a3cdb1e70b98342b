//! Spread and z-score signal generation.

use crate::math::rolling_stats;
use crate::types::AlignedPairSeries;
use serde::Serialize;

/// Direction held on the spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Position {
    /// Short leg A, long hedge_ratio units of leg B
    Short,
    Flat,
    /// Long leg A, short hedge_ratio units of leg B
    Long,
}

impl Position {
    /// Mean-reversion rule: the negative sign of the z-score.
    ///
    /// An undefined z-score yields `None`, not `Flat`.
    pub fn from_z_score(z_score: Option<f64>) -> Option<Self> {
        let z = z_score?;
        if z > 0.0 {
            Some(Position::Short)
        } else if z < 0.0 {
            Some(Position::Long)
        } else {
            Some(Position::Flat)
        }
    }

    pub fn direction(self) -> f64 {
        match self {
            Position::Short => -1.0,
            Position::Flat => 0.0,
            Position::Long => 1.0,
        }
    }
}

/// Derived quantities for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRecord {
    pub hedge_ratio: f64,
    pub spread: f64,
    pub rolling_mean: Option<f64>,
    pub rolling_std: Option<f64>,
    pub z_score: Option<f64>,
}

impl SignalRecord {
    pub fn position(&self) -> Option<Position> {
        Position::from_z_score(self.z_score)
    }
}

/// Compute spread, trailing stats and z-score for every step.
///
/// `hedge_ratios` must be index-aligned with `series`. The z-score is `None`
/// until the window fills, and whenever the trailing deviation is zero.
pub fn generate_signals(
    series: &AlignedPairSeries,
    hedge_ratios: &[f64],
    window: usize,
) -> Vec<SignalRecord> {
    debug_assert_eq!(series.len(), hedge_ratios.len());

    let spreads: Vec<f64> = series
        .points()
        .iter()
        .zip(hedge_ratios)
        .map(|(p, beta)| p.price_a - beta * p.price_b)
        .collect();

    let stats = rolling_stats(&spreads, window);

    spreads
        .iter()
        .zip(hedge_ratios)
        .zip(stats)
        .map(|((&spread, &hedge_ratio), stats)| {
            let z_score = stats.and_then(|s| {
                if s.std_dev > 0.0 {
                    let z = (spread - s.mean) / s.std_dev;
                    z.is_finite().then_some(z)
                } else {
                    None
                }
            });

            SignalRecord {
                hedge_ratio,
                spread,
                rolling_mean: stats.map(|s| s.mean),
                rolling_std: stats.map(|s| s.std_dev),
                z_score,
            }
        })
        .collect()
}
