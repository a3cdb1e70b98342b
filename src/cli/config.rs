//! CLI configuration structs bridging CLI arguments to domain types.
//!
//! These structs decouple the CLI parsing layer from the business logic,
//! allowing command handlers to work with validated, typed configurations.

use crate::backtest::PipelineConfig;
use crate::discovery::{ScanConfig, DEFAULT_CANDIDATES};
use crate::production::ProductionConfig;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when turning CLI arguments into a run configuration.
#[derive(Debug, Error)]
pub enum CliConfigError {
    #[error("At least two tickers are required, got {0}")]
    TooFewTickers(usize),

    #[error("Duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Split a comma-separated ticker list, upper-casing and dropping blanks.
///
/// `"default"` expands to the built-in ETF universe.
pub fn parse_symbols(arg: &str) -> Result<Vec<String>, CliConfigError> {
    if arg.trim().eq_ignore_ascii_case("default") {
        return Ok(DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect());
    }

    let mut symbols: Vec<String> = Vec::new();
    for symbol in arg.split(',').map(|s| s.trim().to_uppercase()) {
        if symbol.is_empty() {
            continue;
        }
        if symbols.contains(&symbol) {
            return Err(CliConfigError::DuplicateTicker(symbol));
        }
        symbols.push(symbol);
    }

    if symbols.len() < 2 {
        return Err(CliConfigError::TooFewTickers(symbols.len()));
    }
    Ok(symbols)
}

fn timeout_from_secs(secs: u64) -> Result<Duration, CliConfigError> {
    if secs == 0 {
        return Err(CliConfigError::ZeroTimeout);
    }
    Ok(Duration::from_secs(secs))
}

fn pipeline_with(leverage: f64, window: usize) -> PipelineConfig {
    PipelineConfig {
        z_window: window,
        ..PipelineConfig::with_leverage(leverage)
    }
}

/// CLI configuration for the `scan` command.
#[derive(Debug, Clone)]
pub struct ScanCliConfig {
    pub scan: ScanConfig,
    /// HTTP timeout per Tiingo request
    pub timeout: Duration,
    /// Offline CSV directory; Tiingo is used when absent
    pub data_dir: Option<PathBuf>,
}

impl ScanCliConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn from_args(
        tickers: &str,
        years: u32,
        leverage: f64,
        window: usize,
        top: usize,
        output: &str,
        timeout_secs: u64,
        data_dir: Option<&str>,
    ) -> Result<Self, CliConfigError> {
        let scan = ScanConfig {
            tickers: parse_symbols(tickers)?,
            lookback_years: years,
            top_n: top,
            output_path: output.to_string(),
            pipeline: pipeline_with(leverage, window),
        };
        scan.validate().map_err(CliConfigError::Invalid)?;

        Ok(Self {
            scan,
            timeout: timeout_from_secs(timeout_secs)?,
            data_dir: data_dir.map(PathBuf::from),
        })
    }
}

/// CLI configuration for the `production` command.
#[derive(Debug, Clone)]
pub struct ProductionCliConfig {
    pub production: ProductionConfig,
    pub timeout: Duration,
    pub data_dir: Option<PathBuf>,
}

impl ProductionCliConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn from_args(
        ticker_a: &str,
        ticker_b: &str,
        years: u32,
        leverage: f64,
        window: usize,
        output: &str,
        timeout_secs: u64,
        data_dir: Option<&str>,
    ) -> Result<Self, CliConfigError> {
        let production = ProductionConfig {
            ticker_a: ticker_a.trim().to_uppercase(),
            ticker_b: ticker_b.trim().to_uppercase(),
            lookback_years: years,
            output_path: output.to_string(),
            pipeline: pipeline_with(leverage, window),
        };
        production.validate().map_err(CliConfigError::Invalid)?;

        Ok(Self {
            production,
            timeout: timeout_from_secs(timeout_secs)?,
            data_dir: data_dir.map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols() {
        assert_eq!(parse_symbols(" gld, GDX ,,xle").unwrap(), vec!["GLD", "GDX", "XLE"]);
        assert_eq!(parse_symbols("default").unwrap().len(), DEFAULT_CANDIDATES.len());
    }

    #[test]
    fn test_parse_symbols_errors() {
        assert!(matches!(parse_symbols("GLD"), Err(CliConfigError::TooFewTickers(1))));
        assert!(matches!(
            parse_symbols("GLD,gld"),
            Err(CliConfigError::DuplicateTicker(s)) if s == "GLD"
        ));
    }

    #[test]
    fn test_scan_from_args() {
        let config = ScanCliConfig::from_args("SPY,QQQ", 3, 5.0, 30, 10, "out.csv", 15, Some("data"))
            .unwrap();
        assert_eq!(config.scan.lookback_years, 3);
        assert_eq!(config.scan.pipeline.leverage, 5.0);
        assert_eq!(config.scan.pipeline.z_window, 30);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.data_dir, Some(PathBuf::from("data")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ScanCliConfig::from_args("SPY,QQQ", 2, 10.0, 20, 20, "o.csv", 0, None).unwrap_err();
        assert!(matches!(err, CliConfigError::ZeroTimeout));
    }

    #[test]
    fn test_production_same_leg_rejected() {
        let err = ProductionCliConfig::from_args("spy", "SPY", 2, 10.0, 20, "d.json", 30, None)
            .unwrap_err();
        assert!(matches!(err, CliConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_leverage_rejected() {
        let err = ProductionCliConfig::from_args("SPY", "QQQ", 2, -1.0, 20, "d.json", 30, None)
            .unwrap_err();
        assert!(matches!(err, CliConfigError::Invalid(_)));
    }
}
