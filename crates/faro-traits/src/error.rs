//! Error types for the faro workspace.
//!
//! This module defines the error taxonomy shared by the evaluator, the data
//! clients and the CLI. Per-ticker data problems are recoverable (the ticker
//! is excluded from the portfolio); benchmark-level problems are not.

use thiserror::Error;

use crate::types::Symbol;

/// The main error type for faro operations.
#[derive(Debug, Error)]
pub enum FaroError {
    /// The requested portfolio size is zero or exceeds the universe.
    #[error("Invalid sample size: requested {requested} tickers from a universe of {available}")]
    InvalidSampleSize {
        /// Number of tickers requested.
        requested: usize,
        /// Number of distinct tickers available.
        available: usize,
    },

    /// Too few observations for a return, moment or yield computation.
    #[error("Insufficient data for {series}: {reason}")]
    InsufficientData {
        /// Name of the series (ticker, benchmark or risk-free source).
        series: String,
        /// What was missing.
        reason: String,
    },

    /// A ticker's return series shares no date with the benchmark's.
    #[error("No overlapping dates between {symbol} and benchmark {benchmark}")]
    NoOverlap {
        /// The ticker being estimated.
        symbol: Symbol,
        /// The benchmark it was aligned against.
        benchmark: Symbol,
    },

    /// The benchmark return series has zero variance.
    #[error("Benchmark {benchmark} has zero variance over {observations} observations")]
    ZeroVariance {
        /// The benchmark symbol.
        benchmark: Symbol,
        /// Number of observations the variance was computed over.
        observations: usize,
    },

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when a symbol is not found in the data.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl FaroError {
    /// Shorthand for an [`FaroError::InsufficientData`] error.
    pub fn insufficient(series: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            series: series.into(),
            reason: reason.into(),
        }
    }

    /// Whether a per-ticker occurrence of this error is handled by excluding
    /// the ticker instead of aborting the run.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. }
                | Self::NoOverlap { .. }
                | Self::SymbolNotFound(_)
                | Self::DataFetch(_)
        )
    }
}

impl From<String> for FaroError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FaroError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for faro operations.
pub type Result<T> = std::result::Result<T, FaroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FaroError::InvalidSampleSize {
            requested: 600,
            available: 503,
        };
        assert_eq!(
            err.to_string(),
            "Invalid sample size: requested 600 tickers from a universe of 503"
        );

        let err = FaroError::NoOverlap {
            symbol: "AAPL".to_string(),
            benchmark: "^GSPC".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No overlapping dates between AAPL and benchmark ^GSPC"
        );

        let err = FaroError::insufficient("MSFT", "1 observation, need 2");
        assert_eq!(
            err.to_string(),
            "Insufficient data for MSFT: 1 observation, need 2"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(FaroError::insufficient("AAPL", "empty").is_recoverable());
        assert!(
            FaroError::NoOverlap {
                symbol: "AAPL".to_string(),
                benchmark: "^GSPC".to_string(),
            }
            .is_recoverable()
        );
        assert!(
            !FaroError::ZeroVariance {
                benchmark: "^GSPC".to_string(),
                observations: 10,
            }
            .is_recoverable()
        );
        assert!(
            !FaroError::InvalidSampleSize {
                requested: 0,
                available: 10,
            }
            .is_recoverable()
        );
    }

    #[test]
    fn test_error_from_string() {
        let err: FaroError = "boom".into();
        assert!(matches!(err, FaroError::Other(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(FaroError::Other("fail".to_string()));
        assert!(err_result.is_err());
    }
}
