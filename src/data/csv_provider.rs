//! Offline provider reading `<dir>/<SYMBOL>.csv`.
//!
//! Expected columns: `date` (YYYY-MM-DD) and `adj_close`, or the Tiingo
//! export name `adjClose`. Extra columns are ignored.

use super::PriceProvider;
use crate::error::RetrievalError;
use crate::types::{PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    #[serde(alias = "adjClose")]
    adj_close: Option<f64>,
}

/// Reads daily prices from local CSV files.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        let upper = self.dir.join(format!("{}.csv", symbol));
        if upper.exists() {
            return upper;
        }
        self.dir.join(format!("{}.csv", symbol.to_lowercase()))
    }

    fn load(path: &Path, symbol: &str, start: NaiveDate) -> Result<PriceSeries, RetrievalError> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut points = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            if row.date < start {
                continue;
            }
            if let Some(price) = row.adj_close.filter(|p| p.is_finite()) {
                points.push(PricePoint::new(row.date, price));
            }
        }

        if points.is_empty() {
            return Err(RetrievalError::EmptySeries);
        }

        Ok(PriceSeries::new(symbol, points))
    }
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn fetch_daily_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, RetrievalError> {
        let path = self.path_for(symbol);
        debug!(symbol = %symbol, path = %path.display(), "Loading CSV prices");

        let symbol = symbol.to_string();
        tokio::task::spawn_blocking(move || Self::load(&path, &symbol, start))
            .await
            .map_err(|e| RetrievalError::Io(std::io::Error::other(e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_reads_and_filters_by_start() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("GLD.csv"),
            "date,adj_close\n2024-03-01,180.5\n2024-03-04,181.0\n2024-03-05,\n2024-03-06,182.25\n",
        )
        .unwrap();

        let provider = CsvPriceProvider::new(dir.path());
        let series = provider.fetch_daily_prices("GLD", day(4)).await.unwrap();

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(4), day(6)]);
        assert_eq!(series.last().unwrap().price, 182.25);
    }

    #[tokio::test]
    async fn test_accepts_tiingo_column_name() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("spy.csv"),
            "date,adjClose,volume\n2024-03-01,500.0,100\n",
        )
        .unwrap();

        let provider = CsvPriceProvider::new(dir.path());
        let series = provider.fetch_daily_prices("SPY", day(1)).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.symbol(), "SPY");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let provider = CsvPriceProvider::new(dir.path());
        let err = provider.fetch_daily_prices("TLT", day(1)).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Csv(_) | RetrievalError::Io(_)));
    }

    #[tokio::test]
    async fn test_no_rows_after_start_is_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("XLU.csv"), "date,adj_close\n2024-03-01,70.0\n").unwrap();

        let provider = CsvPriceProvider::new(dir.path());
        let err = provider.fetch_daily_prices("XLU", day(20)).await.unwrap_err();
        assert!(matches!(err, RetrievalError::EmptySeries));
    }
}
