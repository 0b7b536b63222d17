//! Explicit portfolio command implementation.

use anyhow::Result;
use faro_capm::Portfolio;
use faro_fmp::FmpClient;

use crate::EvalArgs;

/// Evaluate an equal-weight portfolio of the given tickers.
pub(crate) async fn run_explicit(symbols: &[String], args: &EvalArgs) -> Result<()> {
    let portfolio = Portfolio::equal_weight(symbols.iter().map(|s| s.trim().to_uppercase()))?;
    let client = FmpClient::from_env()?;

    super::evaluate(&client, portfolio, args).await
}
