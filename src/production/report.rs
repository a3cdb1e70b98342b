//! Dashboard feed for the production pair.

use crate::backtest::PairBacktest;
use crate::error::PairsError;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetadata {
    /// "A / B"
    pub pair: String,
    pub last_updated: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_z: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_beta: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price_a: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price_b: Decimal,
    /// e.g. "10x"
    pub leverage: String,
}

/// Full per-step series plus the latest readings. All series share one length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub metadata: DashboardMetadata,
    pub dates: Vec<String>,
    pub z_score: Vec<f64>,
    pub beta: Vec<f64>,
    pub cum_strategy: Vec<f64>,
    pub cum_buy_hold: Vec<f64>,
}

fn rounded(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(dp))
        .unwrap_or(Decimal::ZERO)
}

fn or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl DashboardReport {
    /// Build the feed from a completed run. Undefined values are written as 0.
    pub fn from_backtest(backtest: &PairBacktest, now: DateTime<Utc>) -> Self {
        let series = &backtest.series;
        let last = series.points().last();

        let metadata = DashboardMetadata {
            pair: format!("{} / {}", series.symbol_a(), series.symbol_b()),
            last_updated: now.format("%Y-%m-%d %H:%M UTC").to_string(),
            current_z: rounded(backtest.final_z_score().unwrap_or(0.0), 2),
            current_beta: rounded(backtest.final_hedge_ratio(), 3),
            current_price_a: rounded(last.map_or(0.0, |p| p.price_a), 2),
            current_price_b: rounded(last.map_or(0.0, |p| p.price_b), 2),
            leverage: format!("{}x", backtest.leverage),
        };

        Self {
            metadata,
            dates: series
                .dates()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            z_score: backtest.z_scores().map(|z| z.unwrap_or(0.0)).collect(),
            beta: backtest.hedge_ratios().map(or_zero).collect(),
            cum_strategy: backtest.strategy_curve().map(or_zero).collect(),
            cum_buy_hold: backtest.benchmark_curve().map(or_zero).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Write as JSON, creating parent directories if needed.
    pub fn write_json(&self, path: &Path) -> Result<(), PairsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
