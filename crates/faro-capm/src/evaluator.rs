//! CAPM evaluator.
//!
//! Turns materialized price series for a portfolio, a benchmark and a
//! risk-free rate into a [`CapmReport`]. Per-ticker data problems exclude the
//! ticker; benchmark problems abort the run.

use std::collections::BTreeMap;

use faro_traits::{DateRange, FaroError, PriceSeries, Result, Symbol};
use serde::{Deserialize, Serialize};

use crate::{
    beta::{BetaEstimate, benchmark_variance, compute_beta},
    capm::{compute_capm, mean_realized_yield, normalize_risk_free, realized_yield, risk_free_at},
    portfolio::{Portfolio, compute_portfolio_beta},
    report::{CapmReport, Exclusion, ReportPrecision, TickerBeta},
    returns::compute_returns,
    yearly::{RatePolicy, yearly_yields},
};

/// Configuration for the CAPM evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Evaluation window; observations outside it are ignored.
    pub period: DateRange,
    /// Unit and horizon convention of the risk-free quotes.
    pub rates: RatePolicy,
    /// Display precision applied by [`CapmReport::rounded`].
    pub precision: ReportPrecision,
}

/// Everything one evaluation consumes.
#[derive(Debug, Clone)]
pub struct CapmInputs {
    /// The sampled portfolio.
    pub portfolio: Portfolio,
    /// Price history per constituent. Missing entries exclude the ticker.
    pub prices: BTreeMap<Symbol, PriceSeries>,
    /// Benchmark index prices.
    pub benchmark: PriceSeries,
    /// Annualized risk-free quotes.
    pub risk_free: PriceSeries,
}

/// Evaluates a portfolio against a benchmark under CAPM.
///
/// # Example
///
/// ```rust,ignore
/// use faro_capm::{CapmEvaluator, CapmInputs, EvaluatorConfig};
///
/// let evaluator = CapmEvaluator::new(EvaluatorConfig::default());
/// let report = evaluator.evaluate(&inputs)?;
/// println!("CAPM: {:.2}%", report.expected_return);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapmEvaluator {
    config: EvaluatorConfig,
}

impl CapmEvaluator {
    /// Create a new evaluator.
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    fn clip(&self, series: &PriceSeries) -> PriceSeries {
        let period = self.config.period;
        series.filter_dates(|date| period.contains(date))
    }

    /// Run the full computation.
    ///
    /// # Errors
    ///
    /// Fails without a report when:
    /// - the benchmark has fewer than two prices in the period or its returns
    ///   have zero variance
    /// - the risk-free series has no quote within `rates.max_gap_days` of the
    ///   benchmark's first valid date
    /// - no constituent has a computable beta
    pub fn evaluate(&self, inputs: &CapmInputs) -> Result<CapmReport> {
        let benchmark = self.clip(&inputs.benchmark);
        let benchmark_returns = compute_returns(&benchmark)?;
        benchmark_variance(&benchmark_returns)?;
        let benchmark_yield = realized_yield(&benchmark)?;

        let mut estimates: BTreeMap<Symbol, BetaEstimate> = BTreeMap::new();
        let mut survivors: BTreeMap<Symbol, PriceSeries> = BTreeMap::new();
        let mut excluded = Vec::new();

        for symbol in inputs.portfolio.symbols() {
            let estimate = inputs
                .prices
                .get(&symbol)
                .ok_or_else(|| FaroError::SymbolNotFound(symbol.clone()))
                .map(|series| self.clip(series))
                .and_then(|series| {
                    let returns = compute_returns(&series)?;
                    compute_beta(&returns, &benchmark_returns).map(|est| (est, series))
                });

            match estimate {
                Ok((est, series)) => {
                    estimates.insert(symbol.clone(), est);
                    survivors.insert(symbol, series);
                }
                // A degenerate alignment for one ticker does not condemn the
                // benchmark, which already passed the full-period check.
                Err(e) if e.is_recoverable() || matches!(e, FaroError::ZeroVariance { .. }) => {
                    excluded.push(Exclusion {
                        symbol,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let betas: BTreeMap<Symbol, f64> =
            estimates.iter().map(|(s, e)| (s.clone(), e.beta)).collect();
        let portfolio_beta = compute_portfolio_beta(&betas, &inputs.portfolio.weights())?;

        let portfolio_yield = mean_realized_yield(survivors.values())?;

        let (start, end) = match (benchmark.first_valid(), benchmark.last_valid()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => {
                return Err(FaroError::insufficient(
                    benchmark.symbol(),
                    "no valid price in the period",
                ));
            }
        };
        let rates = self.config.rates;
        let quote = risk_free_at(&inputs.risk_free, start, rates.max_gap_days)?;
        let risk_free_rate =
            normalize_risk_free(quote, rates.unit, rates.convention, (end - start).num_days());

        let expected_return = compute_capm(risk_free_rate, portfolio_beta.beta, benchmark_yield);

        let yearly = yearly_yields(
            survivors.values(),
            &benchmark,
            &inputs.risk_free,
            portfolio_beta.beta,
            rates,
        );

        // Report rows follow sampling order
        let table = inputs
            .portfolio
            .symbols()
            .into_iter()
            .filter_map(|symbol| {
                let est = estimates.get(&symbol)?;
                Some(TickerBeta {
                    beta: est.beta,
                    weight: portfolio_beta.weights.get(&symbol).copied().unwrap_or(0.0),
                    observations: est.observations,
                    realized_yield: survivors.get(&symbol).and_then(|s| realized_yield(s).ok()),
                    symbol,
                })
            })
            .collect();

        Ok(CapmReport {
            period: self.config.period,
            benchmark: benchmark.symbol().to_string(),
            portfolio: inputs.portfolio.clone(),
            betas: table,
            excluded,
            portfolio_beta: portfolio_beta.beta,
            portfolio_yield,
            benchmark_yield,
            risk_free_rate,
            expected_return,
            yearly,
        })
    }
}
