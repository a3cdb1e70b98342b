//! Error types for the pairs pipeline and its data providers

use thiserror::Error;

/// Failure to obtain a price history for one instrument.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body could not be interpreted as a price history
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Provider answered but had no usable observations
    #[error("No price data returned")]
    EmptySeries,

    /// Local file access (offline provider)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Local CSV parse failure (offline provider)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur while scanning pairs or running the production pair
#[derive(Error, Debug)]
pub enum PairsError {
    /// Required credential or setting is missing. Fatal before any retrieval.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Price history for one instrument could not be retrieved
    #[error("Retrieval failed for {symbol}: {source}")]
    Retrieval {
        symbol: String,
        #[source]
        source: RetrievalError,
    },

    /// Aligned history too short for the estimator and rolling statistics
    #[error("Insufficient data for {pair}: expected at least {expected} aligned observations, got {actual}")]
    InsufficientData {
        pair: String,
        expected: usize,
        actual: usize,
    },

    /// I/O error (report persistence)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PairsError {
    pub fn retrieval(symbol: impl Into<String>, source: RetrievalError) -> Self {
        Self::Retrieval {
            symbol: symbol.into(),
            source,
        }
    }

    /// Whether a scan may skip the affected instrument or pair and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PairsError::Retrieval { .. } | PairsError::InsufficientData { .. }
        )
    }
}
