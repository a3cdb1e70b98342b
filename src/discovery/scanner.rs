//! Pair scanner
//!
//! Fetches every instrument in the universe once, runs the shared pipeline
//! over each unordered pair against the equal-weight benchmark and ranks the
//! survivors by strategy return.

use super::config::ScanConfig;
use crate::backtest::{run_pair, BacktestResult, Benchmark, PipelineConfig};
use crate::data::{lookback_start, PriceProvider};
use crate::error::PairsError;
use crate::types::PriceSeries;

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Summary of one scanned pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairScanResult {
    pub symbol_a: String,
    pub symbol_b: String,
    pub result: BacktestResult,
}

impl PairScanResult {
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.symbol_a, self.symbol_b)
    }
}

/// All unordered pairs `(items[i], items[j])` with `i < j`, in enumeration order.
pub fn enumerate_pairs<T>(items: &[T]) -> Vec<(&T, &T)> {
    let n = items.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((&items[i], &items[j]));
        }
    }
    pairs
}

/// Retrieve each ticker's history. Failed instruments are logged and dropped.
pub async fn fetch_universe(
    provider: &dyn PriceProvider,
    tickers: &[String],
    start: NaiveDate,
) -> Vec<PriceSeries> {
    info!(
        tickers = tickers.len(),
        start = %start.format("%Y-%m-%d"),
        "Fetching price histories"
    );

    let mut universe = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        match provider.fetch_daily_prices(ticker, start).await {
            Ok(series) => {
                debug!(symbol = %ticker, observations = series.len(), "Fetched");
                universe.push(series);
            }
            Err(e) => {
                let err = PairsError::retrieval(ticker.as_str(), e);
                warn!(symbol = %ticker, error = %err, "Dropping instrument");
            }
        }
    }
    universe
}

/// Run the pipeline for every pair in the universe.
///
/// A failing pair never aborts the scan; it is logged and left out.
pub fn scan_pairs(universe: &[PriceSeries], config: &PipelineConfig) -> Vec<PairScanResult> {
    let pairs = enumerate_pairs(universe);
    debug!(pairs = pairs.len(), "Scanning pairs");

    let mut results = Vec::with_capacity(pairs.len());
    for (series_a, series_b) in pairs {
        match run_pair(series_a, series_b, config, Benchmark::EqualWeight) {
            Ok(backtest) => {
                let result = backtest.summary();
                debug!(
                    pair = %backtest.series.pair_label(),
                    strategy_pct = result.total_strategy_return_pct,
                    alpha_pct = result.alpha_pct(),
                    "Pair evaluated"
                );
                results.push(PairScanResult {
                    symbol_a: series_a.symbol().to_string(),
                    symbol_b: series_b.symbol().to_string(),
                    result,
                });
            }
            Err(e) if e.is_recoverable() => {
                warn!(
                    pair = %format!("{}/{}", series_a.symbol(), series_b.symbol()),
                    error = %e,
                    "Skipping pair"
                );
            }
            Err(e) => {
                warn!(
                    pair = %format!("{}/{}", series_a.symbol(), series_b.symbol()),
                    error = %e,
                    "Pair failed unexpectedly, skipping"
                );
            }
        }
    }
    results
}

/// Sort by total strategy return, highest first. Ties keep enumeration order.
pub fn rank_results(results: &mut [PairScanResult]) {
    results.sort_by(|a, b| {
        b.result
            .total_strategy_return_pct
            .partial_cmp(&a.result.total_strategy_return_pct)
            .unwrap_or(Ordering::Equal)
    });
}

/// Main entry point: fetch, scan and rank.
///
/// # Errors
/// [`PairsError::InvalidConfig`] when `config` fails validation. Retrieval and
/// per-pair failures are absorbed; the result may be empty.
pub async fn run_scan(
    provider: &dyn PriceProvider,
    config: &ScanConfig,
    now: DateTime<Utc>,
) -> Result<Vec<PairScanResult>, PairsError> {
    config.validate().map_err(PairsError::InvalidConfig)?;

    let start = lookback_start(now, config.lookback_years);
    let universe = fetch_universe(provider, &config.tickers, start).await;

    if universe.len() < 2 {
        warn!(
            fetched = universe.len(),
            requested = config.tickers.len(),
            "Fewer than two instruments available, nothing to pair"
        );
    }

    let mut results = scan_pairs(&universe, &config.pipeline);
    rank_results(&mut results);

    info!(
        instruments = universe.len(),
        pairs = results.len(),
        "Scan complete"
    );

    Ok(results)
}
