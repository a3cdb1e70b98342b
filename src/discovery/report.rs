//! Scan result table and CSV persistence

use super::scanner::PairScanResult;
use crate::error::PairsError;
use rust_decimal::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// One row of the ranked scan table, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRow {
    #[serde(rename = "Pair")]
    pub pair: String,
    #[serde(rename = "Strategy %")]
    pub strategy_pct: Decimal,
    #[serde(rename = "50/50 Hold %")]
    pub benchmark_pct: Decimal,
    #[serde(rename = "Alpha %")]
    pub alpha_pct: Decimal,
    #[serde(rename = "Curr Z")]
    pub current_z: Decimal,
}

/// Round half-to-even at 2 dp; non-finite values become zero.
fn to_cents(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

impl From<&PairScanResult> for ScanRow {
    fn from(scan: &PairScanResult) -> Self {
        let result = &scan.result;
        Self {
            pair: scan.pair_label(),
            strategy_pct: to_cents(result.total_strategy_return_pct),
            benchmark_pct: to_cents(result.total_benchmark_return_pct),
            alpha_pct: to_cents(result.alpha_pct()),
            current_z: to_cents(result.final_z_score.unwrap_or(0.0)),
        }
    }
}

pub fn to_rows(results: &[PairScanResult]) -> Vec<ScanRow> {
    results.iter().map(ScanRow::from).collect()
}

/// Render the first `limit` rows as a grid table.
pub fn render_table(rows: &[ScanRow], limit: usize) -> String {
    let mut out = String::new();
    let border = format!(
        "+{}+{}+{}+{}+{}+",
        "-".repeat(14),
        "-".repeat(14),
        "-".repeat(16),
        "-".repeat(12),
        "-".repeat(10)
    );

    let _ = writeln!(out, "{}", border);
    let _ = writeln!(
        out,
        "| {:<12} | {:>12} | {:>14} | {:>10} | {:>8} |",
        "Pair", "Strategy %", "50/50 Hold %", "Alpha %", "Curr Z"
    );
    let _ = writeln!(out, "{}", border.replace('-', "="));

    for row in rows.iter().take(limit) {
        let _ = writeln!(
            out,
            "| {:<12} | {:>12} | {:>14} | {:>10} | {:>8} |",
            row.pair, row.strategy_pct, row.benchmark_pct, row.alpha_pct, row.current_z
        );
    }
    let _ = writeln!(out, "{}", border);
    out
}

/// Write the full ranked table, creating parent directories if needed.
pub fn write_csv(rows: &[ScanRow], path: &Path) -> Result<(), PairsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(["Pair", "Strategy %", "50/50 Hold %", "Alpha %", "Curr Z"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
