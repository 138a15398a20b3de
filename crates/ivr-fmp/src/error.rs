//! Error types for the FMP API client.

use ivr_traits::IvrError;
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Server-side failure (HTTP 5xx).
    #[error("FMP server error: HTTP {0}")]
    Server(u16),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<FmpError> for IvrError {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::MissingApiKey => Self::InvalidConfig(err.to_string()),
            FmpError::RateLimitExceeded => Self::RateLimited(err.to_string()),
            FmpError::Request(_) | FmpError::Server(_) => Self::DataFetch(err.to_string()),
            FmpError::SymbolNotFound(_) | FmpError::NoData(_) => {
                Self::DataUnavailable(err.to_string())
            }
            FmpError::Json(_) | FmpError::Api(_) => Self::Other(err.to_string()),
        }
    }
}
