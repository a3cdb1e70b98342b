//! Kalman Filter for dynamic hedge ratio estimation.
//!
//! Implements a 1D Kalman Filter that tracks the hedge ratio (beta) between
//! the two legs of a pair. The filter is expressed as a pure step function
//! over an explicit [`KalmanState`], folded left-to-right across the aligned
//! history, so each run owns its state and nothing leaks between pairs.
//!
//! # Mathematical Model
//!
//! **State equation** (random walk):
//! ```text
//! β[t] = β[t-1] + w,  where w ~ N(0, Q)
//! ```
//!
//! **Observation equation**:
//! ```text
//! a[t] = β[t] * b[t] + v,  where v ~ N(0, R)
//! ```
//!
//! Where:
//! - `a[t]` is the dependent leg price (leg A)
//! - `b[t]` is the independent leg price (leg B)
//! - `Q` is process noise (how fast beta drifts)
//! - `R` is observation noise (measurement uncertainty)
//!
//! # Usage
//!
//! ```rust
//! use kalman_pairs::math::{KalmanHedgeRatio, KalmanParams};
//!
//! let filter = KalmanHedgeRatio::new(KalmanParams::default());
//! let estimates = filter.filter([(101.0, 100.0), (102.0, 100.0)]);
//! assert_eq!(estimates.len(), 2);
//! assert_eq!(estimates[0].prior_mean, 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// Fixed filter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanParams {
    /// Starting hedge ratio estimate
    #[serde(default = "default_initial_mean")]
    pub initial_mean: f64,
    /// Starting estimate variance (P0)
    #[serde(default = "default_initial_variance")]
    pub initial_variance: f64,
    /// Observation noise variance (R)
    #[serde(default = "default_observation_noise")]
    pub observation_noise: f64,
    /// Process noise variance (Q)
    #[serde(default = "default_process_noise")]
    pub process_noise: f64,
}

fn default_initial_mean() -> f64 {
    0.0
}
fn default_initial_variance() -> f64 {
    1.0
}
fn default_observation_noise() -> f64 {
    1.0
}
fn default_process_noise() -> f64 {
    0.01
}

impl Default for KalmanParams {
    fn default() -> Self {
        Self {
            initial_mean: default_initial_mean(),
            initial_variance: default_initial_variance(),
            observation_noise: default_observation_noise(),
            process_noise: default_process_noise(),
        }
    }
}

impl KalmanParams {
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_mean.is_finite() {
            return Err("initial_mean must be finite".to_string());
        }
        for (name, value) in [
            ("initial_variance", self.initial_variance),
            ("observation_noise", self.observation_noise),
            ("process_noise", self.process_noise),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be finite and non-negative, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Belief about the hedge ratio at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanState {
    /// Hedge ratio estimate (β)
    pub mean: f64,
    /// Estimation error variance (P)
    pub variance: f64,
}

impl KalmanState {
    pub fn initial(params: &KalmanParams) -> Self {
        Self {
            mean: params.initial_mean,
            variance: params.initial_variance,
        }
    }
}

/// Per-step filter output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeEstimate {
    /// Predicted β before seeing this step's observation
    pub prior_mean: f64,
    /// Filtered β after this step's observation (the hedge ratio series)
    pub hedge_ratio: f64,
    /// Filtered variance P
    pub variance: f64,
    /// a - b * β_prior, `None` when the step was skipped
    pub innovation: Option<f64>,
    /// Kalman gain, `None` when the step was skipped
    pub gain: Option<f64>,
}

/// Kalman Filter for estimating dynamic hedge ratios.
///
/// Holds only the immutable parameters; state is threaded through [`step`](Self::step).
#[derive(Debug, Clone, Copy, Default)]
pub struct KalmanHedgeRatio {
    params: KalmanParams,
}

impl KalmanHedgeRatio {
    pub fn new(params: KalmanParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &KalmanParams {
        &self.params
    }

    pub fn initial_state(&self) -> KalmanState {
        KalmanState::initial(&self.params)
    }

    /// Advance the filter by one observation.
    ///
    /// # Numerical Stability
    ///
    /// - Non-finite prices skip the update: the state only receives the
    ///   predict step and the estimate reports no innovation
    /// - Same for a non-positive or non-finite innovation variance
    /// - Variance is floored at zero against f64 rounding
    pub fn step(&self, state: KalmanState, price_a: f64, price_b: f64) -> (KalmanState, HedgeEstimate) {
        // === PREDICT STEP ===
        let m_pred = state.mean;
        let p_pred = state.variance + self.params.process_noise;

        let predict_only = |p: f64| {
            let next = KalmanState {
                mean: m_pred,
                variance: p,
            };
            let estimate = HedgeEstimate {
                prior_mean: m_pred,
                hedge_ratio: m_pred,
                variance: p,
                innovation: None,
                gain: None,
            };
            (next, estimate)
        };

        if !price_a.is_finite() || !price_b.is_finite() {
            return predict_only(p_pred);
        }

        // === UPDATE STEP ===
        // Observation matrix H = b, so the residual is a - β * b
        let innovation = price_a - price_b * m_pred;
        let innovation_variance = price_b * price_b * p_pred + self.params.observation_noise;

        if !innovation_variance.is_finite() || innovation_variance <= 0.0 {
            return predict_only(p_pred);
        }

        let gain = price_b * p_pred / innovation_variance;
        let mean = m_pred + gain * innovation;
        let variance = ((1.0 - gain * price_b) * p_pred).max(0.0);

        let next = KalmanState { mean, variance };
        let estimate = HedgeEstimate {
            prior_mean: m_pred,
            hedge_ratio: mean,
            variance,
            innovation: Some(innovation),
            gain: Some(gain),
        };
        (next, estimate)
    }

    /// Run the filter over `(price_a, price_b)` observations from the initial state.
    pub fn filter<I>(&self, observations: I) -> Vec<HedgeEstimate>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let observations = observations.into_iter();
        let mut estimates = Vec::with_capacity(observations.size_hint().0);

        observations.fold(self.initial_state(), |state, (price_a, price_b)| {
            let (next, estimate) = self.step(state, price_a, price_b);
            estimates.push(estimate);
            next
        });

        estimates
    }
}
