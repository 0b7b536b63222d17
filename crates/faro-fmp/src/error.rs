//! Error types for the FMP API client.

use faro_traits::FaroError;
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

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),

    /// Panel conversion failed.
    #[error("Failed to build market data panel: {0}")]
    Panel(#[from] polars::prelude::PolarsError),
}

impl From<FmpError> for FaroError {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::SymbolNotFound(symbol) | FmpError::NoData(symbol) => {
                Self::SymbolNotFound(symbol)
            }
            FmpError::Panel(e) => Self::Polars(e),
            other => Self::DataFetch(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_faro_error() {
        let err: FaroError = FmpError::NoData("ZZZZ".to_string()).into();
        assert!(matches!(err, FaroError::SymbolNotFound(ref s) if s == "ZZZZ"));

        let err: FaroError = FmpError::RateLimitExceeded.into();
        assert!(matches!(err, FaroError::DataFetch(_)));
        assert!(err.is_recoverable());

        let err: FaroError = FmpError::MissingApiKey.into();
        assert!(err.to_string().contains("FMP_API_KEY"));
    }
}
