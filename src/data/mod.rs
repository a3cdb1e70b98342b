//! Market Data Providers
//!
//! Daily price retrieval behind the [`PriceProvider`] trait. Strategies and the
//! scanner only see `PriceSeries`; new sources can be added by implementing the
//! trait without touching the pipeline.

pub mod csv_provider;
pub mod tiingo;

use crate::error::RetrievalError;
use crate::types::PriceSeries;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};

pub use csv_provider::CsvPriceProvider;
pub use tiingo::{TiingoClient, TiingoConfig, TIINGO_KEY_VAR};

/// Source of daily adjusted-close histories.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch the history of `symbol` from `start` (inclusive) to the latest available day.
    ///
    /// An empty history is reported as [`RetrievalError::EmptySeries`].
    async fn fetch_daily_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, RetrievalError>;
}

/// First day of a lookback of `years` × 365 days ending at `now`.
pub fn lookback_start(now: DateTime<Utc>, years: u32) -> NaiveDate {
    (now - ChronoDuration::days(i64::from(years) * 365)).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_lookback_start() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 15, 30, 0).unwrap();
        assert_eq!(
            lookback_start(now, 2),
            NaiveDate::from_ymd_opt(2024, 10, 17).unwrap()
        );
        assert_eq!(lookback_start(now, 0), now.date_naive());
    }
}
