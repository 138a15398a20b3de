//! Error types for the IVR screener.
//!
//! Missing individual metrics are never errors (normalizers resolve them to
//! neutral defaults) and a failed safety filter is a verdict, not an error.
//! What remains is fetch failures and invalid configuration.

use thiserror::Error;

/// The main error type for IVR operations.
#[derive(Debug, Error)]
pub enum IvrError {
    /// The provider returned no usable data for a ticker (e.g. no price history).
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// A request to the data provider failed.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// The data provider rejected the request because of rate limiting.
    #[error("Rate limited by data provider: {0}")]
    RateLimited(String),

    /// A fetch did not complete within the configured timeout.
    #[error("Fetch timed out after {0} ms")]
    Timeout(u64),

    /// Configuration values are out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl IvrError {
    /// Whether a retry of the same request might succeed.
    ///
    /// Network failures, rate limiting and timeouts are transient; missing
    /// data and bad configuration are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DataFetch(_) | Self::RateLimited(_) | Self::Timeout(_)
        )
    }
}

impl From<String> for IvrError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for IvrError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for IVR operations.
pub type Result<T> = std::result::Result<T, IvrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IvrError::DataUnavailable("AAPL has no price history".to_string());
        assert_eq!(err.to_string(), "Data unavailable: AAPL has no price history");

        let err = IvrError::Timeout(2500);
        assert_eq!(err.to_string(), "Fetch timed out after 2500 ms");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(IvrError::DataFetch("connection reset".into()).is_recoverable());
        assert!(IvrError::RateLimited("429".into()).is_recoverable());
        assert!(IvrError::Timeout(10).is_recoverable());
        assert!(!IvrError::DataUnavailable("empty".into()).is_recoverable());
        assert!(!IvrError::InvalidConfig("weights".into()).is_recoverable());
    }

    #[test]
    fn test_error_from_string() {
        let err: IvrError = "boom".into();
        assert!(matches!(err, IvrError::Other(_)));
    }
}
