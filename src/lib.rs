pub mod backtest;
pub mod cli;
pub mod commands;
pub mod data;
pub mod discovery;
pub mod error;
pub mod math;
pub mod observability;
pub mod production;
pub mod types;
