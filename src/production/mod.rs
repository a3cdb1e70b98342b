//! Production Runner
//!
//! Runs the shared pipeline for one fixed pair over its full fetched history,
//! measured against buy-and-hold of the first leg, and publishes the complete
//! per-step series as a dashboard feed. Unlike the scan, any retrieval or
//! alignment failure is fatal.

pub mod config;
pub mod report;

pub use config::ProductionConfig;
pub use report::{DashboardMetadata, DashboardReport};

use crate::backtest::{run_pair, Benchmark, PairBacktest};
use crate::data::{lookback_start, PriceProvider};
use crate::error::PairsError;
use chrono::{DateTime, Utc};
use tracing::info;

/// Fetch both legs and run the pipeline.
///
/// # Errors
/// - [`PairsError::InvalidConfig`] if `config` fails validation
/// - [`PairsError::Retrieval`] if either leg cannot be fetched
/// - [`PairsError::InsufficientData`] if the aligned history is too short
pub async fn run_production(
    provider: &dyn PriceProvider,
    config: &ProductionConfig,
    now: DateTime<Utc>,
) -> Result<PairBacktest, PairsError> {
    config.validate().map_err(PairsError::InvalidConfig)?;

    let start = lookback_start(now, config.lookback_years);
    info!(
        ticker_a = %config.ticker_a,
        ticker_b = %config.ticker_b,
        start = %start.format("%Y-%m-%d"),
        "Fetching production pair"
    );

    let series_a = provider
        .fetch_daily_prices(&config.ticker_a, start)
        .await
        .map_err(|e| PairsError::retrieval(config.ticker_a.as_str(), e))?;
    let series_b = provider
        .fetch_daily_prices(&config.ticker_b, start)
        .await
        .map_err(|e| PairsError::retrieval(config.ticker_b.as_str(), e))?;

    let backtest = run_pair(&series_a, &series_b, &config.pipeline, Benchmark::BuyAndHoldA)?;

    info!(
        pair = %backtest.series.pair_label(),
        observations = backtest.len(),
        current_z = ?backtest.final_z_score(),
        current_beta = backtest.final_hedge_ratio(),
        "Production run complete"
    );

    Ok(backtest)
}

/// Run the pair and write its dashboard feed to `config.output_path`.
pub async fn publish_dashboard(
    provider: &dyn PriceProvider,
    config: &ProductionConfig,
    now: DateTime<Utc>,
) -> Result<DashboardReport, PairsError> {
    let backtest = run_production(provider, config, now).await?;
    let report = DashboardReport::from_backtest(&backtest, now);
    report.write_json(std::path::Path::new(&config.output_path))?;

    info!(
        output = %config.output_path,
        points = report.len(),
        leverage = %report.metadata.leverage,
        "Dashboard data written"
    );

    Ok(report)
}
