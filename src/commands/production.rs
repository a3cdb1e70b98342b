//! Production pair command handler.

use super::select_provider;
use crate::cli::ProductionCliConfig;
use crate::production::publish_dashboard;

use chrono::Utc;
use tracing::{error, info};

/// Run the production pair and write the dashboard feed.
///
/// # Errors
/// Any retrieval, alignment or persistence failure is fatal.
pub async fn run_production_command(
    config: &ProductionCliConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let production = &config.production;
    info!(
        ticker_a = %production.ticker_a,
        ticker_b = %production.ticker_b,
        leverage = production.pipeline.leverage,
        "--- Kalman Pairs: Production Run ---"
    );

    let provider = select_provider(config.data_dir.as_deref(), config.timeout)?;

    let report = match publish_dashboard(provider.as_ref(), production, Utc::now()).await {
        Ok(report) => report,
        Err(e) => {
            error!("Production run failed: {}", e);
            return Err(e.into());
        }
    };

    println!("Current Z-Score: {}", report.metadata.current_z);
    println!("Current Beta: {}", report.metadata.current_beta);
    println!(
        "Success: {} updated with {} leverage.",
        production.output_path, report.metadata.leverage
    );

    Ok(())
}
