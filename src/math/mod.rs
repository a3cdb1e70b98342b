//! Mathematical utilities for the pairs pipeline.
//!
//! This module provides the statistical primitives used by the backtest,
//! including Kalman filtering for dynamic hedge ratio estimation and
//! trailing-window statistics for the z-score.

pub mod kalman;
pub mod rolling;

pub use kalman::{HedgeEstimate, KalmanHedgeRatio, KalmanParams, KalmanState};
pub use rolling::{population_stats, rolling_stats, WindowStats};
