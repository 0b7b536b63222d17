//! Calendar-year breakdown of realized and expected returns.

use std::collections::BTreeSet;

use chrono::Datelike;
use faro_traits::PriceSeries;
use serde::{Deserialize, Serialize};

use crate::capm::{
    DEFAULT_MAX_RATE_GAP_DAYS, RateUnit, RiskFreeConvention, compute_capm, mean_realized_yield,
    normalize_risk_free, realized_yield, risk_free_at,
};

/// Yields for one calendar year, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyYield {
    /// Calendar year.
    pub year: i32,
    /// Mean realized yield of the constituents within the year.
    pub portfolio_yield: f64,
    /// Realized yield of the benchmark within the year.
    pub benchmark_yield: f64,
    /// Risk-free rate applied, after unit and horizon normalization.
    pub risk_free_rate: f64,
    /// CAPM expected return for the year.
    pub expected_return: f64,
    /// Number of constituents with a yield in that year.
    pub constituents: usize,
}

/// Rate settings shared by the full-period and per-year CAPM figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePolicy {
    /// Unit of the risk-free quotes.
    pub unit: RateUnit,
    /// How annual quotes map onto the evaluated horizon.
    pub convention: RiskFreeConvention,
    /// Largest distance in days between a period start and its quote.
    pub max_gap_days: i64,
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            unit: RateUnit::default(),
            convention: RiskFreeConvention::default(),
            max_gap_days: DEFAULT_MAX_RATE_GAP_DAYS,
        }
    }
}

fn in_year(series: &PriceSeries, year: i32) -> PriceSeries {
    series.filter_dates(|date| date.year() == year)
}

/// Per-year portfolio, benchmark and CAPM figures.
///
/// Years come from the benchmark's observation dates. The risk-free rate of a
/// year is that year's quote nearest the benchmark's first observation in
/// the year, and the portfolio beta is held constant across years. A year is
/// skipped when the benchmark, every constituent, or the risk-free series
/// lacks data for it.
pub fn yearly_yields<'a>(
    constituents: impl IntoIterator<Item = &'a PriceSeries>,
    benchmark: &PriceSeries,
    risk_free: &PriceSeries,
    portfolio_beta: f64,
    rates: RatePolicy,
) -> Vec<YearlyYield> {
    let constituents: Vec<&PriceSeries> = constituents.into_iter().collect();
    let years: BTreeSet<i32> = benchmark
        .observations()
        .iter()
        .map(|o| o.date.year())
        .collect();

    years
        .into_iter()
        .filter_map(|year| {
            let bench = in_year(benchmark, year);
            let benchmark_yield = realized_yield(&bench).ok()?;
            let (start, end) = (bench.first_valid()?.date, bench.last_valid()?.date);

            let slices: Vec<PriceSeries> = constituents.iter().map(|s| in_year(s, year)).collect();
            let portfolio_yield = mean_realized_yield(&slices).ok()?;
            let covered = slices
                .iter()
                .filter(|s| realized_yield(s).is_ok())
                .count();

            let quote = risk_free_at(&in_year(risk_free, year), start, rates.max_gap_days).ok()?;
            let risk_free_rate =
                normalize_risk_free(quote, rates.unit, rates.convention, (end - start).num_days());

            Some(YearlyYield {
                year,
                portfolio_yield,
                benchmark_yield,
                risk_free_rate,
                expected_return: compute_capm(risk_free_rate, portfolio_beta, benchmark_yield),
                constituents: covered,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use faro_traits::Date;

    fn d(year: i32, month: u32, day: u32) -> Date {
        Date::from_ymd_opt(year, month, day).unwrap()
    }

    fn two_years(symbol: &str, prices: [f64; 4]) -> PriceSeries {
        PriceSeries::from_pairs(
            symbol,
            [
                (d(2021, 1, 4), prices[0]),
                (d(2021, 12, 31), prices[1]),
                (d(2022, 1, 3), prices[2]),
                (d(2022, 12, 30), prices[3]),
            ],
        )
        .unwrap()
    }

    fn rates() -> PriceSeries {
        PriceSeries::from_pairs("TBILL", [(d(2021, 1, 4), 0.1), (d(2022, 1, 3), 1.0)]).unwrap()
    }

    #[test]
    fn test_yearly_yields_cover_each_year() {
        let benchmark = two_years("^GSPC", [100.0, 120.0, 120.0, 96.0]);
        let a = two_years("A", [10.0, 11.0, 11.0, 11.0]);
        let b = two_years("B", [20.0, 26.0, 26.0, 13.0]);

        let years = yearly_yields([&a, &b], &benchmark, &rates(), 1.0, RatePolicy::default());

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2021);
        assert_relative_eq!(years[0].benchmark_yield, 20.0, epsilon = 1e-9);
        assert_relative_eq!(years[0].portfolio_yield, 20.0, epsilon = 1e-9);
        assert_relative_eq!(years[0].risk_free_rate, 0.1, epsilon = 1e-12);
        assert_eq!(years[0].constituents, 2);

        assert_eq!(years[1].year, 2022);
        assert_relative_eq!(years[1].benchmark_yield, -20.0, epsilon = 1e-9);
        assert_relative_eq!(years[1].portfolio_yield, -25.0, epsilon = 1e-9);
        assert_relative_eq!(years[1].risk_free_rate, 1.0, epsilon = 1e-12);
        // Beta of one reproduces the benchmark
        assert_eq!(years[1].expected_return, years[1].benchmark_yield);
    }

    #[test]
    fn test_yearly_yields_skip_year_without_constituents() {
        let benchmark = two_years("^GSPC", [100.0, 110.0, 110.0, 121.0]);
        let late = PriceSeries::from_pairs("LATE", [(d(2022, 1, 3), 5.0), (d(2022, 12, 30), 6.0)])
            .unwrap();

        let years = yearly_yields([&late], &benchmark, &rates(), 1.2, RatePolicy::default());
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].year, 2022);
        assert_eq!(years[0].constituents, 1);
    }

    #[test]
    fn test_yearly_yields_period_scaled_rates() {
        let benchmark = two_years("^GSPC", [100.0, 110.0, 110.0, 121.0]);
        let a = two_years("A", [1.0, 2.0, 2.0, 3.0]);
        let policy = RatePolicy {
            unit: RateUnit::Percent,
            convention: RiskFreeConvention::PeriodScaled,
            ..Default::default()
        };

        let years = yearly_yields([&a], &benchmark, &rates(), 0.0, policy);
        // Slightly less than a full year between first and last observation
        assert!(years[1].risk_free_rate < 1.0);
        assert!(years[1].risk_free_rate > 0.95);
        assert_eq!(years[1].expected_return, years[1].risk_free_rate);
    }

    #[test]
    fn test_yearly_yields_skip_year_without_rate() {
        let benchmark = two_years("^GSPC", [100.0, 110.0, 110.0, 121.0]);
        let a = two_years("A", [10.0, 11.0, 11.0, 12.0]);
        let only_2021 = PriceSeries::from_pairs("TBILL", [(d(2021, 1, 4), 0.1)]).unwrap();

        let years = yearly_yields([&a], &benchmark, &only_2021, 1.0, RatePolicy::default());
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].year, 2021);
        assert_eq!(years[0].risk_free_rate, 0.1);
    }

    #[test]
    fn test_yearly_yields_rate_stays_within_year() {
        let benchmark = two_years("^GSPC", [100.0, 110.0, 110.0, 121.0]);
        let a = two_years("A", [10.0, 11.0, 11.0, 12.0]);
        // 2022 is quoted only from mid-January, too far from its first session
        let rates = PriceSeries::from_pairs(
            "TBILL",
            [(d(2021, 1, 4), 0.1), (d(2021, 12, 31), 0.2), (d(2022, 1, 20), 1.0)],
        )
        .unwrap();

        let years = yearly_yields([&a], &benchmark, &rates, 1.0, RatePolicy::default());
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].year, 2021);
    }
}
