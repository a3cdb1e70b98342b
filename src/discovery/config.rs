//! Configuration for the pair scan

use crate::backtest::PipelineConfig;
use serde::{Deserialize, Serialize};

/// Default ETF universe: sector, commodity, country and rates proxies
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "GDX", "GLD", "USO", "XLE", "EWC", "EWA", "XLF", "XLU", "SPY", "QQQ", "TLT", "TBT",
];

/// Configuration for a scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Instruments to pair up
    pub tickers: Vec<String>,

    /// Historical lookback in years (× 365 days)
    #[serde(default = "default_lookback_years")]
    pub lookback_years: u32,

    /// Rows printed to the console table
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Destination for the full ranked table
    #[serde(default = "default_output_path")]
    pub output_path: String,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_lookback_years() -> u32 {
    2
}
fn default_top_n() -> usize {
    20
}
fn default_output_path() -> String {
    "strategy_results.csv".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            lookback_years: default_lookback_years(),
            top_n: default_top_n(),
            output_path: default_output_path(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Create a config with custom tickers
    pub fn with_tickers(tickers: Vec<String>) -> Self {
        Self {
            tickers,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tickers.len() < 2 {
            return Err(format!(
                "need at least 2 tickers to form pairs, got {}",
                self.tickers.len()
            ));
        }
        if self.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err("tickers cannot be blank".to_string());
        }
        if self.output_path.trim().is_empty() {
            return Err("output_path cannot be empty".to_string());
        }
        self.pipeline.validate()
    }
}
