//! Evaluation output handed to the presentation layer.

use faro_traits::{DateRange, Symbol};
use serde::{Deserialize, Serialize};

use crate::{portfolio::Portfolio, yearly::YearlyYield};

/// Number of decimal digits kept when a report is rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPrecision {
    /// Digits for betas and the portfolio beta.
    pub beta: u32,
    /// Digits for yields, rates and the CAPM expected return.
    pub yield_pct: u32,
}

impl Default for ReportPrecision {
    fn default() -> Self {
        Self {
            beta: 3,
            yield_pct: 2,
        }
    }
}

/// Round `value` to `digits` decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use faro_capm::round_to;
///
/// assert_eq!(round_to(1.23456, 3), 1.235);
/// assert_eq!(round_to(-0.125, 2), -0.13);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Beta row of one portfolio constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerBeta {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Estimated beta.
    pub beta: f64,
    /// Weight applied in the portfolio beta, after re-normalization.
    pub weight: f64,
    /// Number of dates shared with the benchmark.
    pub observations: usize,
    /// Realized yield over the period, in percent.
    pub realized_yield: Option<f64>,
}

/// A sampled ticker that did not make it into the figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Why it was dropped.
    pub reason: String,
}

/// Full result of one CAPM evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapmReport {
    /// Evaluation window.
    pub period: DateRange,
    /// Benchmark symbol.
    pub benchmark: Symbol,
    /// Portfolio as sampled, with its `1/n` weights.
    pub portfolio: Portfolio,
    /// Per-ticker betas of the constituents that survived.
    pub betas: Vec<TickerBeta>,
    /// Constituents dropped for lack of data.
    pub excluded: Vec<Exclusion>,
    /// Weighted portfolio beta.
    pub portfolio_beta: f64,
    /// Mean realized yield of the surviving constituents, in percent.
    pub portfolio_yield: f64,
    /// Realized yield of the benchmark, in percent.
    pub benchmark_yield: f64,
    /// Risk-free rate used in the CAPM formula, in percent.
    pub risk_free_rate: f64,
    /// CAPM expected return, in percent.
    pub expected_return: f64,
    /// Calendar-year breakdown.
    pub yearly: Vec<YearlyYield>,
}

impl CapmReport {
    /// A copy with every statistic rounded for display.
    pub fn rounded(&self, precision: ReportPrecision) -> Self {
        let b = |v: f64| round_to(v, precision.beta);
        let y = |v: f64| round_to(v, precision.yield_pct);

        Self {
            period: self.period,
            benchmark: self.benchmark.clone(),
            portfolio: self.portfolio.clone(),
            betas: self
                .betas
                .iter()
                .map(|row| TickerBeta {
                    beta: b(row.beta),
                    realized_yield: row.realized_yield.map(y),
                    ..row.clone()
                })
                .collect(),
            excluded: self.excluded.clone(),
            portfolio_beta: b(self.portfolio_beta),
            portfolio_yield: y(self.portfolio_yield),
            benchmark_yield: y(self.benchmark_yield),
            risk_free_rate: y(self.risk_free_rate),
            expected_return: y(self.expected_return),
            yearly: self
                .yearly
                .iter()
                .map(|row| YearlyYield {
                    portfolio_yield: y(row.portfolio_yield),
                    benchmark_yield: y(row.benchmark_yield),
                    risk_free_rate: y(row.risk_free_rate),
                    expected_return: y(row.expected_return),
                    ..*row
                })
                .collect(),
        }
    }

    /// Whether the portfolio realized more than CAPM expected.
    pub fn outperformed(&self) -> bool {
        self.portfolio_yield > self.expected_return
    }
}
