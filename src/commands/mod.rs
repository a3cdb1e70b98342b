//! CLI command handlers.
//!
//! This module contains the implementation for each CLI subcommand,
//! delegating to the scan and production pipelines.

mod production;
mod scan;

pub use production::run_production_command;
pub use scan::run_scan_command;

use crate::data::{CsvPriceProvider, PriceProvider, TiingoClient};
use crate::error::PairsError;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Offline CSV provider when `data_dir` is set, Tiingo otherwise.
///
/// # Errors
/// [`PairsError::Configuration`] when Tiingo is selected and `TIINGO_KEY` is missing.
pub(crate) fn select_provider(
    data_dir: Option<&Path>,
    timeout: Duration,
) -> Result<Box<dyn PriceProvider>, PairsError> {
    match data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using offline CSV prices");
            Ok(Box::new(CsvPriceProvider::new(dir)))
        }
        None => Ok(Box::new(TiingoClient::from_env_with_timeout(timeout)?)),
    }
}
