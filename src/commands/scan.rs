//! Pair scan command handler.
//!
//! Implements the `scan` subcommand: backtest every pair of the universe,
//! print the top of the ranking and persist the full table.

use super::select_provider;
use crate::cli::ScanCliConfig;
use crate::discovery::{render_table, run_scan, to_rows, write_csv};

use chrono::Utc;
use std::path::Path;
use tracing::{error, info, warn};

/// Run the pair scan.
///
/// # Errors
/// Returns error if the credential is missing or the CSV cannot be written.
/// Instruments and pairs that fail are skipped, not reported as errors.
pub async fn run_scan_command(config: &ScanCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Kalman Pairs: Pair Scan ---");
    info!(
        tickers = config.scan.tickers.len(),
        years = config.scan.lookback_years,
        leverage = config.scan.pipeline.leverage,
        window = config.scan.pipeline.z_window,
        "Configuration loaded"
    );

    let provider = select_provider(config.data_dir.as_deref(), config.timeout)?;

    let results = match run_scan(provider.as_ref(), &config.scan, Utc::now()).await {
        Ok(results) => results,
        Err(e) => {
            error!("Scan failed: {}", e);
            return Err(e.into());
        }
    };

    if results.is_empty() {
        warn!("No pairs survived the scan");
        println!("No results generated.");
        return Ok(());
    }

    let rows = to_rows(&results);
    println!(
        "\n=== TOP {} PAIRS (Leverage {}x) ===",
        config.scan.top_n.min(rows.len()),
        config.scan.pipeline.leverage
    );
    print!("{}", render_table(&rows, config.scan.top_n));

    write_csv(&rows, Path::new(&config.scan.output_path))?;
    info!(
        output = %config.scan.output_path,
        pairs = rows.len(),
        "Results saved"
    );
    println!("\n✓ Saved {} pairs to {}", rows.len(), config.scan.output_path);

    Ok(())
}
