//! Configuration for the single-pair production run

use crate::backtest::PipelineConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionConfig {
    #[serde(default = "default_ticker_a")]
    pub ticker_a: String,

    #[serde(default = "default_ticker_b")]
    pub ticker_b: String,

    /// Historical lookback in years (× 365 days)
    #[serde(default = "default_lookback_years")]
    pub lookback_years: u32,

    /// Dashboard JSON destination
    #[serde(default = "default_output_path")]
    pub output_path: String,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_ticker_a() -> String {
    "SPY".to_string()
}
fn default_ticker_b() -> String {
    "QQQ".to_string()
}
fn default_lookback_years() -> u32 {
    2
}
fn default_output_path() -> String {
    "dashboard_data.json".to_string()
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            ticker_a: default_ticker_a(),
            ticker_b: default_ticker_b(),
            lookback_years: default_lookback_years(),
            output_path: default_output_path(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ProductionConfig {
    pub fn for_pair(ticker_a: impl Into<String>, ticker_b: impl Into<String>) -> Self {
        Self {
            ticker_a: ticker_a.into(),
            ticker_b: ticker_b.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ticker_a.trim().is_empty() || self.ticker_b.trim().is_empty() {
            return Err("both tickers must be set".to_string());
        }
        if self.ticker_a.eq_ignore_ascii_case(&self.ticker_b) {
            return Err(format!(
                "ticker_a and ticker_b must differ, got {} twice",
                self.ticker_a
            ));
        }
        if self.output_path.trim().is_empty() {
            return Err("output_path cannot be empty".to_string());
        }
        self.pipeline.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProductionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ticker_a, "SPY");
        assert_eq!(config.ticker_b, "QQQ");
        assert_eq!(config.output_path, "dashboard_data.json");
    }

    #[test]
    fn test_same_ticker_rejected() {
        assert!(ProductionConfig::for_pair("SPY", "spy").validate().is_err());
    }

    #[test]
    fn test_blank_ticker_rejected() {
        assert!(ProductionConfig::for_pair("", "QQQ").validate().is_err());
    }
}
