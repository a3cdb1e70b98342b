//! Leveraged position simulator.
//!
//! Turns the signal series into daily strategy returns and compounds them.
//! The position decided at step t is only ever applied to the return realized
//! between t and t+1: the loop carries a [`HeldTrade`] from the previous
//! iteration and the current step's signal is stored only after that step's
//! return has been booked.

use super::signal::{Position, SignalRecord};
use crate::types::AlignedPairSeries;
use serde::Serialize;

/// Passive reference the strategy is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Benchmark {
    /// 50/50 blend of both legs, rebalanced daily (scan mode)
    EqualWeight,
    /// Buy and hold leg A (production mode)
    BuyAndHoldA,
}

impl Benchmark {
    fn daily_return(self, return_a: Option<f64>, return_b: Option<f64>) -> Option<f64> {
        match self {
            Benchmark::EqualWeight => Some(0.5 * return_a? + 0.5 * return_b?),
            Benchmark::BuyAndHoldA => return_a,
        }
    }
}

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub leverage: f64,
    pub loss_floor: f64,
    pub benchmark: Benchmark,
}

/// What was known at the close of the previous step.
#[derive(Debug, Clone, Copy)]
struct HeldTrade {
    position: Option<Position>,
    hedge_ratio: f64,
}

/// Per-step simulation output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRecord {
    /// Position decided from this step's z-score (applied to the next step)
    pub position: Option<Position>,
    /// Position from the previous step that earned this step's return
    pub held_position: Option<Position>,
    pub return_a: Option<f64>,
    pub return_b: Option<f64>,
    /// Unleveraged spread return
    pub strategy_return: Option<f64>,
    /// Leveraged and floored return
    pub leveraged_return: Option<f64>,
    pub benchmark_return: Option<f64>,
    pub cumulative_strategy: f64,
    pub cumulative_benchmark: f64,
}

/// Leverage a raw return and floor the result.
///
/// The result is never below `loss_floor`, whatever the magnitude of the inputs.
#[inline]
pub fn apply_leverage(raw_return: f64, leverage: f64, loss_floor: f64) -> f64 {
    // f64::max discards a NaN operand, so the floor also absorbs NaN
    (raw_return * leverage).max(loss_floor)
}

/// Simple return between two prices; `None` when undefined.
#[inline]
pub fn simple_return(previous: f64, current: f64) -> Option<f64> {
    let r = current / previous - 1.0;
    r.is_finite().then_some(r)
}

/// Run the simulation over an aligned series and its index-aligned signals.
pub fn simulate(
    series: &AlignedPairSeries,
    signals: &[SignalRecord],
    params: &SimulationParams,
) -> Vec<PositionRecord> {
    debug_assert_eq!(series.len(), signals.len());

    let mut records = Vec::with_capacity(signals.len());
    let mut held: Option<HeldTrade> = None;
    let mut previous_prices: Option<(f64, f64)> = None;
    let mut cumulative_strategy = 1.0;
    let mut cumulative_benchmark = 1.0;

    for (point, signal) in series.points().iter().zip(signals) {
        let (return_a, return_b) = match previous_prices {
            Some((prev_a, prev_b)) => (
                simple_return(prev_a, point.price_a),
                simple_return(prev_b, point.price_b),
            ),
            None => (None, None),
        };

        let strategy_return = held.and_then(|trade| {
            let direction = trade.position?.direction();
            let r = direction * (return_a? - trade.hedge_ratio * return_b?);
            r.is_finite().then_some(r)
        });

        let leveraged_return =
            strategy_return.map(|r| apply_leverage(r, params.leverage, params.loss_floor));
        let benchmark_return = params.benchmark.daily_return(return_a, return_b);

        // Undefined returns compound as zero
        cumulative_strategy *= 1.0 + leveraged_return.unwrap_or(0.0);
        cumulative_benchmark *= 1.0 + benchmark_return.unwrap_or(0.0);

        let position = signal.position();
        records.push(PositionRecord {
            position,
            held_position: held.and_then(|trade| trade.position),
            return_a,
            return_b,
            strategy_return,
            leveraged_return,
            benchmark_return,
            cumulative_strategy,
            cumulative_benchmark,
        });

        held = Some(HeldTrade {
            position,
            hedge_ratio: signal.hedge_ratio,
        });
        previous_prices = Some((point.price_a, point.price_b));
    }

    records
}
