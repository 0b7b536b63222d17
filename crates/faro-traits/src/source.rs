//! Market data collaborator trait.
//!
//! The evaluator consumes already-materialized series; a `PriceSource` is
//! whatever fetches them. Implementations exist for the FMP HTTP API and, in
//! tests, for in-memory fixtures.

use std::future::Future;

use crate::{DateRange, PriceField, PriceSeries, Result, Symbol};

/// A provider of index constituents, price histories and risk-free rates.
///
/// Implementations must be thread-safe so that histories can be fetched
/// concurrently.
pub trait PriceSource: Send + Sync {
    /// Symbols of the universe portfolios are sampled from.
    fn constituents(&self) -> impl Future<Output = Result<Vec<Symbol>>> + Send;

    /// Daily price history of `symbol` over `range`.
    ///
    /// # Errors
    ///
    /// Implementations return [`crate::FaroError::DataFetch`] for transport
    /// failures and [`crate::FaroError::SymbolNotFound`] when the provider
    /// has no history for the symbol.
    fn price_history(
        &self,
        symbol: &str,
        range: &DateRange,
        field: PriceField,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;

    /// Annualized risk-free rate quotes over `range`, in the provider's unit.
    fn risk_free_rates(&self, range: &DateRange) -> impl Future<Output = Result<PriceSeries>> + Send;
}
