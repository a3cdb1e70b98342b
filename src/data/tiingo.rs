//! Tiingo daily prices client
//!
//! Fetches adjusted closes from the Tiingo end-of-day endpoint:
//! `GET {base_url}/{ticker}/prices?startDate=YYYY-MM-DD&token=...`

use super::PriceProvider;
use crate::error::{PairsError, RetrievalError};
use crate::types::{PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use governor::{clock::DefaultClock, state::InMemoryState, Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding the Tiingo API token
pub const TIINGO_KEY_VAR: &str = "TIINGO_KEY";

const DEFAULT_BASE_URL: &str = "https://api.tiingo.com/tiingo/daily";

/// Connection settings for [`TiingoClient`].
#[derive(Debug, Clone)]
pub struct TiingoConfig {
    pub api_key: String,
    pub base_url: String,
    /// Upper bound for a single request, connect included
    pub timeout: Duration,
    pub requests_per_minute: u32,
}

impl TiingoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            requests_per_minute: 60,
        }
    }

    /// Read the token from `TIINGO_KEY`.
    ///
    /// # Errors
    /// [`PairsError::Configuration`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self, PairsError> {
        let api_key = std::env::var(TIINGO_KEY_VAR).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(PairsError::Configuration(format!(
                "{} must be set in .env file or environment",
                TIINGO_KEY_VAR
            )));
        }
        Ok(Self::new(api_key.trim()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One row of the Tiingo daily prices response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TiingoBar {
    date: DateTime<Utc>,
    adj_close: Option<f64>,
}

pub struct TiingoClient {
    http: reqwest::Client,
    config: TiingoConfig,
    rate_limiter: Arc<RateLimiter<governor::state::direct::NotKeyed, InMemoryState, DefaultClock>>,
}

impl TiingoClient {
    pub fn new(config: TiingoConfig) -> Result<Self, PairsError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PairsError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            "Initializing Tiingo client"
        );

        Ok(Self {
            http,
            config,
            rate_limiter,
        })
    }

    /// Build a client from `TIINGO_KEY`, failing before any request when it is missing.
    pub fn from_env() -> Result<Self, PairsError> {
        Self::new(TiingoConfig::from_env()?)
    }

    pub fn from_env_with_timeout(timeout: Duration) -> Result<Self, PairsError> {
        Self::new(TiingoConfig::from_env()?.with_timeout(timeout))
    }

    fn prices_url(&self, symbol: &str) -> String {
        format!(
            "{}/{}/prices",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }
}

/// Decode a daily prices body into a series.
fn parse_prices(symbol: &str, body: &str) -> Result<PriceSeries, RetrievalError> {
    let bars: Vec<TiingoBar> = serde_json::from_str(body).map_err(|e| {
        // Error payloads come back as {"detail": "..."}
        let snippet: String = body.chars().take(200).collect();
        RetrievalError::Malformed(format!("{} (body: {})", e, snippet))
    })?;

    let points: Vec<PricePoint> = bars
        .into_iter()
        .filter_map(|bar| {
            bar.adj_close
                .filter(|p| p.is_finite())
                .map(|p| PricePoint::new(bar.date.date_naive(), p))
        })
        .collect();

    if points.is_empty() {
        return Err(RetrievalError::EmptySeries);
    }

    Ok(PriceSeries::new(symbol, points))
}

#[async_trait]
impl PriceProvider for TiingoClient {
    async fn fetch_daily_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, RetrievalError> {
        self.rate_limiter.until_ready().await;

        let start_date = start.format("%Y-%m-%d").to_string();
        debug!(symbol = %symbol, start = %start_date, "Requesting daily prices");

        let response = self
            .http
            .get(self.prices_url(symbol))
            .header("Content-Type", "application/json")
            .query(&[
                ("startDate", start_date.as_str()),
                ("token", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let series = parse_prices(symbol, &body)?;
        debug!(symbol = %symbol, observations = series.len(), "Daily prices received");
        Ok(series)
    }
}
