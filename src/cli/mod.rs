//! CLI argument parsing using clap.
//!
//! This module defines the command-line interface for the pairs scanner and
//! the production runner.

mod config;

pub use config::{parse_symbols, CliConfigError, ProductionCliConfig, ScanCliConfig};

use clap::{Parser, Subcommand};

/// Kalman Pairs - dynamic hedge ratio pairs scanner and signal runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Backtest every pair of a ticker universe and rank by strategy return
    Scan {
        /// Tickers to pair up (comma-separated, or "default" for the built-in ETF list)
        #[arg(long, default_value = "default")]
        tickers: String,
        /// Historical lookback in years
        #[arg(long, default_value_t = 2)]
        years: u32,
        /// Leverage applied to daily spread returns
        #[arg(long, default_value_t = 10.0)]
        leverage: f64,
        /// Rolling z-score window (days)
        #[arg(long, default_value_t = 20)]
        window: usize,
        /// Number of rows to print
        #[arg(long, default_value_t = 20)]
        top: usize,
        /// Output CSV for the full ranked table
        #[arg(long, default_value = "strategy_results.csv")]
        output: String,
        /// HTTP timeout per request in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        /// Read <TICKER>.csv files from this directory instead of calling Tiingo
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Run one fixed pair and publish the dashboard feed
    #[command(alias = "run-pair")]
    Production {
        /// First leg (the buy-and-hold benchmark)
        #[arg(long, default_value = "SPY")]
        ticker_a: String,
        /// Second leg
        #[arg(long, default_value = "QQQ")]
        ticker_b: String,
        /// Historical lookback in years
        #[arg(long, default_value_t = 2)]
        years: u32,
        /// Leverage applied to daily spread returns
        #[arg(long, default_value_t = 10.0)]
        leverage: f64,
        /// Rolling z-score window (days)
        #[arg(long, default_value_t = 20)]
        window: usize,
        /// Output JSON path
        #[arg(long, default_value = "dashboard_data.json")]
        output: String,
        /// HTTP timeout per request in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        /// Read <TICKER>.csv files from this directory instead of calling Tiingo
        #[arg(long)]
        data_dir: Option<String>,
    },
}
