//! Backtesting engine for the dynamic-hedge pairs strategy.
//!
//! Data flows strictly through the stages below; each stage produces a fresh
//! value consumed by the next and nothing is shared between runs.
//!
//! 1. [`align`] - intersect two price histories on date
//! 2. [`crate::math::KalmanHedgeRatio`] - causal hedge ratio per step
//! 3. [`signal`] - spread, rolling statistics and z-score
//! 4. [`simulator`] - lagged leveraged returns and compounding

pub mod align;
pub mod config;
pub mod pipeline;
pub mod signal;
pub mod simulator;

pub use align::align;
pub use config::PipelineConfig;
pub use pipeline::{run_aligned, run_pair, BacktestResult, PairBacktest};
pub use signal::{generate_signals, Position, SignalRecord};
pub use simulator::{apply_leverage, simulate, Benchmark, PositionRecord, SimulationParams};
