//! Configuration for the shared backtest pipeline

use crate::math::KalmanParams;
use serde::{Deserialize, Serialize};

/// Immutable parameters passed into every pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Multiplier applied to raw spread returns
    #[serde(default = "default_leverage")]
    pub leverage: f64,

    /// Rolling window for the spread z-score (observations)
    #[serde(default = "default_z_window")]
    pub z_window: usize,

    /// Minimum aligned observations before a pair is simulated
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,

    /// Lowest allowed leveraged daily return (margin-call floor)
    #[serde(default = "default_loss_floor")]
    pub loss_floor: f64,

    /// Hedge ratio filter parameters
    #[serde(default)]
    pub kalman: KalmanParams,
}

fn default_leverage() -> f64 {
    10.0
}
fn default_z_window() -> usize {
    20
}
fn default_min_observations() -> usize {
    100
}
fn default_loss_floor() -> f64 {
    -0.99
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            leverage: default_leverage(),
            z_window: default_z_window(),
            min_observations: default_min_observations(),
            loss_floor: default_loss_floor(),
            kalman: KalmanParams::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_leverage(leverage: f64) -> Self {
        Self {
            leverage,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.leverage.is_finite() || self.leverage <= 0.0 {
            return Err(format!("leverage must be positive, got {}", self.leverage));
        }
        if self.z_window < 2 {
            return Err(format!("z_window must be at least 2, got {}", self.z_window));
        }
        if self.min_observations < self.z_window {
            return Err(format!(
                "min_observations ({}) must be at least z_window ({})",
                self.min_observations, self.z_window
            ));
        }
        if !(self.loss_floor > -1.0 && self.loss_floor <= 0.0) {
            return Err(format!(
                "loss_floor must be in (-1, 0], got {}",
                self.loss_floor
            ));
        }
        self.kalman.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.leverage, 10.0);
        assert_eq!(config.z_window, 20);
        assert_eq!(config.min_observations, 100);
        assert_eq!(config.loss_floor, -0.99);
    }

    #[test]
    fn test_invalid_leverage() {
        assert!(PipelineConfig::with_leverage(0.0).validate().is_err());
        assert!(PipelineConfig::with_leverage(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_window_larger_than_minimum_is_invalid() {
        let config = PipelineConfig {
            z_window: 150,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_loss_floor_bounds() {
        let config = PipelineConfig {
            loss_floor: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"leverage": 3.0}"#).unwrap();
        assert_eq!(config.leverage, 3.0);
        assert_eq!(config.z_window, 20);
        assert_eq!(config.kalman, KalmanParams::default());
    }
}
