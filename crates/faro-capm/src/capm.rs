//! CAPM expected return, realized yields and risk-free rate handling.
//!
//! ```text
//! E(R_p) = R_f + β_p (E(R_m) − R_f)
//! ```
//!
//! All three inputs must share one unit and one horizon. Yields are
//! percentages over the evaluated period; [`RateUnit`] and
//! [`RiskFreeConvention`] bring an annualized risk-free quote onto that
//! footing.

use std::{fmt, str::FromStr};

use faro_traits::{Date, FaroError, Observation, PriceSeries, Result, stats};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Days per year used to scale annual quotes.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// CAPM expected return.
///
/// Evaluated as `(1 − β) R_f + β R_m`, which is algebraically the textbook
/// form and returns `benchmark_yield` exactly when `β = 1`.
///
/// # Example
///
/// ```
/// use faro_capm::compute_capm;
///
/// assert_eq!(compute_capm(4.2, 1.0, 18.4), 18.4);
/// assert!((compute_capm(2.0, 1.5, 10.0) - 14.0).abs() < 1e-12);
/// ```
pub fn compute_capm(risk_free_rate: f64, portfolio_beta: f64, benchmark_yield: f64) -> f64 {
    (1.0 - portfolio_beta) * risk_free_rate + portfolio_beta * benchmark_yield
}

/// Realized percentage change from the first to the last valid price.
///
/// # Errors
///
/// Returns [`FaroError::InsufficientData`] if the series has no valid price
/// or its first valid price is zero.
pub fn realized_yield(prices: &PriceSeries) -> Result<f64> {
    let (Some(first), Some(last)) = (prices.first_valid(), prices.last_valid()) else {
        return Err(FaroError::insufficient(
            prices.symbol(),
            "no valid price observation",
        ));
    };

    if first.value == 0.0 {
        return Err(FaroError::insufficient(
            prices.symbol(),
            format!("first price on {} is zero", first.date),
        ));
    }

    Ok((last.value / first.value - 1.0) * 100.0)
}

/// Equal-weighted mean of the realized yields of several series.
///
/// Series without a computable yield are skipped.
///
/// # Errors
///
/// Returns [`FaroError::InsufficientData`] if no series has a yield.
pub fn mean_realized_yield<'a>(series: impl IntoIterator<Item = &'a PriceSeries>) -> Result<f64> {
    let yields: Vec<f64> = series
        .into_iter()
        .filter_map(|s| realized_yield(s).ok())
        .collect();

    stats::mean(&Array1::from_vec(yields)).ok_or_else(|| {
        FaroError::insufficient("portfolio", "no constituent has a realized yield")
    })
}

/// Default largest distance, in calendar days, between a date and the
/// risk-free quote used for it. Covers weekends and market holidays.
pub const DEFAULT_MAX_RATE_GAP_DAYS: i64 = 7;

/// Risk-free quote in effect at `date`.
///
/// Takes the first valid quote on or after `date`; failing that, the last
/// valid quote before it. Either way the quote must lie at most
/// `max_gap_days` calendar days from `date`.
///
/// # Errors
///
/// Returns [`FaroError::InsufficientData`] when no valid quote lies within
/// `max_gap_days` of `date`.
pub fn risk_free_at(rates: &PriceSeries, date: Date, max_gap_days: i64) -> Result<f64> {
    let valid = || rates.observations().iter().filter(|o| o.value.is_finite());
    let near = |o: &&Observation| (o.date - date).num_days().abs() <= max_gap_days;

    valid()
        .find(|o| o.date >= date)
        .filter(near)
        .or_else(|| valid().filter(|o| o.date < date).last().filter(near))
        .map(|o| o.value)
        .ok_or_else(|| {
            FaroError::insufficient(
                rates.symbol(),
                format!("no risk-free quote within {max_gap_days} day(s) of {date}"),
            )
        })
}

/// How a rate source quotes its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    /// `4.5` means 4.5%.
    #[default]
    Percent,
    /// `0.045` means 4.5%.
    Decimal,
}

impl RateUnit {
    /// Convert a quote in this unit to percent.
    pub fn to_percent(self, quote: f64) -> f64 {
        match self {
            Self::Percent => quote,
            Self::Decimal => quote * 100.0,
        }
    }
}

impl FromStr for RateUnit {
    type Err = FaroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "percent" | "pct" => Ok(Self::Percent),
            "decimal" => Ok(Self::Decimal),
            other => Err(FaroError::InvalidData(format!(
                "unknown rate unit '{other}' (expected percent or decimal)"
            ))),
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Percent => "percent",
            Self::Decimal => "decimal",
        })
    }
}

/// How an annualized risk-free quote is brought to the evaluation horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFreeConvention {
    /// Use the annual quote unchanged, whatever the period length.
    #[default]
    AsQuoted,
    /// Compound the annual quote over the period:
    /// `((1 + r/100)^(days/365) − 1) × 100`.
    PeriodScaled,
}

impl RiskFreeConvention {
    /// Apply the convention to an annual rate in percent over `days`.
    pub fn apply(self, annual_percent: f64, days: i64) -> f64 {
        match self {
            Self::AsQuoted => annual_percent,
            Self::PeriodScaled => {
                let years = days.max(0) as f64 / DAYS_PER_YEAR;
                ((1.0 + annual_percent / 100.0).powf(years) - 1.0) * 100.0
            }
        }
    }
}

impl FromStr for RiskFreeConvention {
    type Err = FaroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "as-quoted" | "quoted" => Ok(Self::AsQuoted),
            "period-scaled" | "scaled" => Ok(Self::PeriodScaled),
            other => Err(FaroError::InvalidData(format!(
                "unknown risk-free convention '{other}' (expected as-quoted or period-scaled)"
            ))),
        }
    }
}

impl fmt::Display for RiskFreeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AsQuoted => "as-quoted",
            Self::PeriodScaled => "period-scaled",
        })
    }
}

/// Normalize a raw risk-free quote to a percentage over `days`.
pub fn normalize_risk_free(
    quote: f64,
    unit: RateUnit,
    convention: RiskFreeConvention,
    days: i64,
) -> f64 {
    convention.apply(unit.to_percent(quote), days)
}
