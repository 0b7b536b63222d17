//! Random portfolio command implementation.

use anyhow::Result;
use faro_capm::sample_portfolio;
use faro_fmp::FmpClient;
use faro_traits::PriceSource;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::EvalArgs;

/// Sample `n` constituents and evaluate them against the benchmark.
pub(crate) async fn run_random(n: usize, seed: Option<u64>, args: &EvalArgs) -> Result<()> {
    let client = FmpClient::from_env()?;

    let universe = client.constituents().await?;
    info!(universe = universe.len(), n, ?seed, "sampling portfolio");

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let portfolio = sample_portfolio(&universe, n, &mut rng)?;

    super::evaluate(&client, portfolio, args).await
}
