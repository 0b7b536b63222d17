//! Data loading utilities for the faro CLI.

use std::collections::BTreeMap;

use faro_capm::{CapmInputs, Portfolio};
use faro_traits::{DateRange, FaroError, PriceField, PriceSource, Symbol};
use futures::{StreamExt, stream};
use tracing::{info, warn};

/// What to fetch for one evaluation.
#[derive(Debug, Clone)]
pub(crate) struct LoadRequest {
    pub(crate) benchmark: Symbol,
    pub(crate) range: DateRange,
    pub(crate) field: PriceField,
    pub(crate) concurrency: usize,
}

/// Evaluator inputs plus the tickers whose history could not be fetched.
#[derive(Debug)]
pub(crate) struct Loaded {
    pub(crate) inputs: CapmInputs,
    pub(crate) failures: BTreeMap<Symbol, String>,
}

/// Fetch everything the evaluator needs for `portfolio`.
///
/// Benchmark and risk-free failures abort the load. Constituent histories are
/// fetched concurrently, at most `concurrency` at a time; a failed ticker is
/// logged and left out so the evaluator reports it as excluded.
pub(crate) async fn load_inputs<S: PriceSource>(
    source: &S,
    portfolio: Portfolio,
    request: &LoadRequest,
) -> Result<Loaded, FaroError> {
    let range = &request.range;

    info!(benchmark = %request.benchmark, %range, "fetching benchmark and risk-free rate");
    let benchmark = source
        .price_history(&request.benchmark, range, request.field)
        .await?;
    if !benchmark.is_empty() && benchmark.first_valid().is_none() {
        return Err(FaroError::insufficient(
            &request.benchmark,
            format!(
                "every {} price is missing; the provider may not supply this field",
                request.field
            ),
        ));
    }
    let risk_free = source.risk_free_rates(range).await?;

    info!(
        tickers = portfolio.len(),
        concurrency = request.concurrency,
        "fetching constituent prices"
    );
    let fetched: Vec<_> = stream::iter(portfolio.symbols())
        .map(|symbol| async move {
            let result = source.price_history(&symbol, range, request.field).await;
            (symbol, result)
        })
        .buffer_unordered(request.concurrency.max(1))
        .collect()
        .await;

    let mut prices = BTreeMap::new();
    let mut failures = BTreeMap::new();
    for (symbol, result) in fetched {
        match result {
            Ok(series) => {
                prices.insert(symbol, series);
            }
            Err(e) => {
                warn!(%symbol, error = %e, "failed to fetch price history");
                failures.insert(symbol, e.to_string());
            }
        }
    }

    Ok(Loaded {
        inputs: CapmInputs {
            portfolio,
            prices,
            benchmark,
            risk_free,
        },
        failures,
    })
}

/// Build the evaluation window, falling back to the default bounds.
pub(crate) fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, FaroError> {
    let default = DateRange::default();
    let start = start
        .map(faro_traits::parse_date)
        .transpose()?
        .unwrap_or(default.start());
    let end = end
        .map(faro_traits::parse_date)
        .transpose()?
        .unwrap_or(default.end());
    DateRange::new(start, end)
}
