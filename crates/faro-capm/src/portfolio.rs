//! Portfolio sampling and portfolio-level beta.

use std::collections::{BTreeMap, HashSet};

use faro_traits::{FaroError, Result, Symbol};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One position of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Portfolio weight.
    pub weight: f64,
}

/// An equally weighted set of distinct tickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    /// Build an equal-weight portfolio from explicit tickers.
    ///
    /// Repeated tickers are kept once, at their first position.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidSampleSize`] for an empty ticker list.
    pub fn equal_weight<I, S>(tickers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols = distinct(tickers.into_iter().map(Into::into));
        if symbols.is_empty() {
            return Err(FaroError::InvalidSampleSize {
                requested: 0,
                available: 0,
            });
        }

        let weight = 1.0 / symbols.len() as f64;
        let holdings = symbols
            .into_iter()
            .map(|symbol| Holding { symbol, weight })
            .collect();

        Ok(Self { holdings })
    }

    /// Positions in sampling order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Tickers in sampling order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.holdings.iter().map(|h| h.symbol.clone()).collect()
    }

    /// Ticker to weight mapping.
    pub fn weights(&self) -> BTreeMap<Symbol, f64> {
        self.holdings
            .iter()
            .map(|h| (h.symbol.clone(), h.weight))
            .collect()
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Whether the portfolio has no positions.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Keep the first occurrence of every symbol, preserving order.
fn distinct(symbols: impl Iterator<Item = Symbol>) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    symbols.filter(|s| seen.insert(s.clone())).collect()
}

/// Draw `n` distinct tickers uniformly at random, without replacement.
///
/// Every sampled ticker gets weight `1/n`. The random source is injected so
/// that runs can be reproduced from a seed.
///
/// # Errors
///
/// Returns [`FaroError::InvalidSampleSize`] when `n` is zero or larger than
/// the number of distinct tickers in `universe`.
///
/// # Example
///
/// ```
/// use faro_capm::sample_portfolio;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let universe: Vec<String> = ["AAPL", "MSFT", "JPM", "XOM"].iter().map(|s| s.to_string()).collect();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let portfolio = sample_portfolio(&universe, 2, &mut rng).unwrap();
/// assert_eq!(portfolio.len(), 2);
/// ```
pub fn sample_portfolio<R>(universe: &[Symbol], n: usize, rng: &mut R) -> Result<Portfolio>
where
    R: Rng + ?Sized,
{
    let candidates = distinct(universe.iter().cloned());

    if n == 0 || n > candidates.len() {
        return Err(FaroError::InvalidSampleSize {
            requested: n,
            available: candidates.len(),
        });
    }

    let picked = rand::seq::index::sample(rng, candidates.len(), n)
        .into_iter()
        .map(|i| candidates[i].clone());

    Portfolio::equal_weight(picked)
}

/// Portfolio beta with the weights that were actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBeta {
    /// `Σ w_i β_i` over the tickers with a beta.
    pub beta: f64,
    /// Weights re-normalized over the tickers with a beta; they sum to 1.
    pub weights: BTreeMap<Symbol, f64>,
}

/// Weighted sum of per-ticker betas.
///
/// Tickers without a beta are dropped from both the sum and the
/// normalization: the surviving weights are divided by their total, so for
/// an equal-weight portfolio each of the `m` survivors weighs `1/m`.
///
/// # Errors
///
/// Returns [`FaroError::InsufficientData`] if no weighted ticker has a beta.
pub fn compute_portfolio_beta(
    betas: &BTreeMap<Symbol, f64>,
    weights: &BTreeMap<Symbol, f64>,
) -> Result<PortfolioBeta> {
    let survivors: Vec<(&Symbol, f64, f64)> = weights
        .iter()
        .filter_map(|(symbol, &weight)| {
            let beta = *betas.get(symbol)?;
            (beta.is_finite() && weight.is_finite() && weight >= 0.0)
                .then_some((symbol, weight, beta))
        })
        .collect();

    let total: f64 = survivors.iter().map(|&(_, w, _)| w).sum();
    if survivors.is_empty() || total <= 0.0 {
        return Err(FaroError::insufficient(
            "portfolio",
            format!("none of {} tickers has a computable beta", weights.len()),
        ));
    }

    let mut beta = 0.0;
    let mut effective = BTreeMap::new();
    for (symbol, weight, ticker_beta) in survivors {
        let w = weight / total;
        beta += w * ticker_beta;
        effective.insert(symbol.clone(), w);
    }

    Ok(PortfolioBeta {
        beta,
        weights: effective,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn universe(n: usize) -> Vec<Symbol> {
        (0..n).map(|i| format!("T{i:03}")).collect()
    }

    #[test]
    fn test_equal_weight_portfolio() {
        let portfolio = Portfolio::equal_weight(["AAPL", "MSFT", "AAPL", "JPM"]).unwrap();
        assert_eq!(portfolio.symbols(), vec!["AAPL", "MSFT", "JPM"]);
        assert!(
            portfolio
                .holdings()
                .iter()
                .all(|h| (h.weight - 1.0 / 3.0).abs() < 1e-15)
        );
        assert_relative_eq!(portfolio.weights().values().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_equal_weight_empty() {
        let err = Portfolio::equal_weight(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, FaroError::InvalidSampleSize { .. }));
    }

    #[test]
    fn test_sample_invalid_sizes() {
        let universe = universe(5);
        let mut rng = StdRng::seed_from_u64(1);

        let err = sample_portfolio(&universe, 0, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            FaroError::InvalidSampleSize {
                requested: 0,
                available: 5
            }
        ));

        let err = sample_portfolio(&universe, 6, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            FaroError::InvalidSampleSize {
                requested: 6,
                available: 5
            }
        ));
    }

    #[test]
    fn test_sample_counts_distinct_universe() {
        let universe: Vec<Symbol> = ["A", "B", "A", "C"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(3);

        assert!(sample_portfolio(&universe, 4, &mut rng).is_err());
        let portfolio = sample_portfolio(&universe, 3, &mut rng).unwrap();
        let mut symbols = portfolio.symbols();
        symbols.sort();
        assert_eq!(symbols, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sample_is_reproducible_from_seed() {
        let universe = universe(500);
        let a = sample_portfolio(&universe, 8, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sample_portfolio(&universe, 8, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_full_universe() {
        let universe = universe(10);
        let portfolio = sample_portfolio(&universe, 10, &mut StdRng::seed_from_u64(9)).unwrap();
        let mut symbols = portfolio.symbols();
        symbols.sort();
        assert_eq!(symbols, universe);
    }

    proptest! {
        #[test]
        fn prop_sample_returns_n_distinct_members(size in 1usize..60, pick in 1usize..60, seed in any::<u64>()) {
            prop_assume!(pick <= size);
            let universe = universe(size);
            let mut rng = StdRng::seed_from_u64(seed);

            let portfolio = sample_portfolio(&universe, pick, &mut rng).unwrap();
            let symbols = portfolio.symbols();
            let unique: HashSet<_> = symbols.iter().collect();

            prop_assert_eq!(symbols.len(), pick);
            prop_assert_eq!(unique.len(), pick);
            prop_assert!(symbols.iter().all(|s| universe.contains(s)));
            let total: f64 = portfolio.weights().values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_portfolio_beta_all_present() {
        let portfolio = Portfolio::equal_weight(["A", "B"]).unwrap();
        let betas = BTreeMap::from([("A".to_string(), 0.8), ("B".to_string(), 1.4)]);

        let result = compute_portfolio_beta(&betas, &portfolio.weights()).unwrap();
        assert_relative_eq!(result.beta, 1.1, epsilon = 1e-12);
        assert_eq!(result.weights.len(), 2);
    }

    #[test]
    fn test_portfolio_beta_renormalizes_survivors() {
        let portfolio = Portfolio::equal_weight(["A", "B", "C"]).unwrap();
        // C has no overlap with the benchmark and therefore no beta
        let betas = BTreeMap::from([("A".to_string(), 1.0), ("B".to_string(), 2.0)]);

        let result = compute_portfolio_beta(&betas, &portfolio.weights()).unwrap();

        assert!(!result.weights.contains_key("C"));
        assert_eq!(result.weights.len(), 2);
        for weight in result.weights.values() {
            assert_relative_eq!(*weight, 0.5, epsilon = 1e-12);
        }
        assert_relative_eq!(result.weights.values().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.beta, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_beta_ignores_unweighted_betas() {
        let weights = BTreeMap::from([("A".to_string(), 1.0)]);
        let betas = BTreeMap::from([("A".to_string(), 0.9), ("Z".to_string(), 5.0)]);

        let result = compute_portfolio_beta(&betas, &weights).unwrap();
        assert_relative_eq!(result.beta, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_beta_none_available() {
        let portfolio = Portfolio::equal_weight(["A", "B"]).unwrap();
        let err = compute_portfolio_beta(&BTreeMap::new(), &portfolio.weights()).unwrap_err();
        assert!(matches!(err, FaroError::InsufficientData { .. }));
    }
}
