#![doc(issue_tracker_base_url = "https://github.com/factordynamics/faro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the faro CAPM evaluator.
//!
//! This crate provides the shared vocabulary of the workspace: dated price
//! and return series, the polars-backed market data panel, the error
//! taxonomy, sample statistics, and the [`PriceSource`] trait that market
//! data providers implement.

/// The version of the faro-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod series;
pub mod source;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{FaroError, Result};
pub use series::{Observation, PriceSeries, ReturnSeries};
pub use source::PriceSource;
pub use types::{DATE_FORMAT, Date, DateRange, MarketData, PriceField, Symbol, parse_date};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
