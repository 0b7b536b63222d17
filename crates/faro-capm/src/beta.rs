//! Beta estimation against a benchmark.
//!
//! Beta measures the sensitivity of a security's returns to benchmark returns:
//! `β = Cov(R_i, R_m) / Var(R_m)`, both moments taken over the dates the two
//! series share.

use faro_traits::{
    FaroError, Result, ReturnSeries,
    stats::{sample_covariance, sample_variance},
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Beta of one security, with the moments it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaEstimate {
    /// `covariance / benchmark_variance`.
    pub beta: f64,
    /// Sample covariance of security and benchmark returns.
    pub covariance: f64,
    /// Sample variance of benchmark returns on the aligned dates.
    pub benchmark_variance: f64,
    /// Number of dates both series share.
    pub observations: usize,
}

/// Sample variance of a benchmark return series.
///
/// Used to reject a degenerate benchmark once, before any ticker is
/// estimated against it.
///
/// # Errors
///
/// - [`FaroError::InsufficientData`] with fewer than two returns
/// - [`FaroError::ZeroVariance`] when every return is identical
pub fn benchmark_variance(benchmark: &ReturnSeries) -> Result<f64> {
    let values = Array1::from_vec(benchmark.values());
    let variance = sample_variance(&values).ok_or_else(|| {
        FaroError::insufficient(
            benchmark.symbol(),
            format!("{} return(s), need at least 2", values.len()),
        )
    })?;

    if variance == 0.0 {
        return Err(FaroError::ZeroVariance {
            benchmark: benchmark.symbol().to_string(),
            observations: values.len(),
        });
    }

    Ok(variance)
}

/// Estimate the beta of `ticker` against `benchmark`.
///
/// Both series are restricted to their common dates first. The estimate is
/// kept at full precision; rounding belongs to the report.
///
/// # Errors
///
/// - [`FaroError::NoOverlap`] if the series share no date
/// - [`FaroError::InsufficientData`] if they share only one date
/// - [`FaroError::ZeroVariance`] if the aligned benchmark returns are constant
/// - [`FaroError::InvalidData`] if a moment is not finite
///
/// # Example
///
/// ```
/// use faro_capm::compute_beta;
/// use faro_traits::{Date, ReturnSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let market = ReturnSeries::from_pairs("^GSPC", [(d(2), 0.01), (d(3), -0.02), (d(4), 0.015)]).unwrap();
/// let stock = ReturnSeries::from_pairs("AAPL", [(d(2), 0.02), (d(3), -0.04), (d(4), 0.03)]).unwrap();
///
/// let estimate = compute_beta(&stock, &market).unwrap();
/// assert!((estimate.beta - 2.0).abs() < 1e-10);
/// ```
pub fn compute_beta(ticker: &ReturnSeries, benchmark: &ReturnSeries) -> Result<BetaEstimate> {
    let aligned = ticker.align(benchmark);

    if aligned.is_empty() {
        return Err(FaroError::NoOverlap {
            symbol: ticker.symbol().to_string(),
            benchmark: benchmark.symbol().to_string(),
        });
    }

    let observations = aligned.len();
    let insufficient = || {
        FaroError::insufficient(
            ticker.symbol(),
            format!(
                "{observations} date(s) shared with {}, need at least 2",
                benchmark.symbol()
            ),
        )
    };

    let asset: Array1<f64> = aligned.iter().map(|&(_, r, _)| r).collect();
    let market: Array1<f64> = aligned.iter().map(|&(_, _, m)| m).collect();

    let benchmark_variance = sample_variance(&market).ok_or_else(insufficient)?;
    if benchmark_variance == 0.0 {
        return Err(FaroError::ZeroVariance {
            benchmark: benchmark.symbol().to_string(),
            observations,
        });
    }

    let covariance = sample_covariance(&asset, &market).ok_or_else(insufficient)?;
    let beta = covariance / benchmark_variance;

    if !beta.is_finite() {
        return Err(FaroError::InvalidData(format!(
            "non-finite beta for {} (covariance {covariance}, variance {benchmark_variance})",
            ticker.symbol()
        )));
    }

    Ok(BetaEstimate {
        beta,
        covariance,
        benchmark_variance,
        observations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::compute_returns;
    use approx::assert_relative_eq;
    use faro_traits::{Date, PriceSeries};

    fn d(offset: i64) -> Date {
        Date::from_ymd_opt(2022, 1, 3).unwrap() + chrono::Duration::days(offset)
    }

    fn returns(symbol: &str, values: &[f64]) -> ReturnSeries {
        ReturnSeries::from_pairs(
            symbol,
            values.iter().enumerate().map(|(i, &v)| (d(i as i64), v)),
        )
        .unwrap()
    }

    fn market() -> ReturnSeries {
        returns("^GSPC", &[0.012, -0.008, 0.004, 0.021, -0.015, 0.003, -0.002])
    }

    #[test]
    fn test_beta_of_scaled_returns() {
        let market = market();
        for k in [0.5, 1.0, 1.7, 3.0] {
            let scaled: Vec<f64> = market.values().iter().map(|r| k * r).collect();
            let estimate = compute_beta(&returns("X", &scaled), &market).unwrap();
            assert_relative_eq!(estimate.beta, k, epsilon = 1e-10);
            assert_eq!(estimate.observations, 7);
        }
    }

    #[test]
    fn test_beta_of_benchmark_is_one() {
        let market = market();
        let estimate = compute_beta(&market, &market).unwrap();
        assert_relative_eq!(estimate.beta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_beta_negative_correlation() {
        let market = market();
        let inverse: Vec<f64> = market.values().iter().map(|r| -r).collect();
        let estimate = compute_beta(&returns("SH", &inverse), &market).unwrap();
        assert_relative_eq!(estimate.beta, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_beta_uses_only_shared_dates() {
        let market = market();
        // Ticker only trades on the first three benchmark dates plus one extra day
        let ticker = ReturnSeries::from_pairs(
            "IPO",
            [(d(0), 0.024), (d(1), -0.016), (d(2), 0.008), (d(30), 0.5)],
        )
        .unwrap();

        let estimate = compute_beta(&ticker, &market).unwrap();
        assert_eq!(estimate.observations, 3);
        assert_relative_eq!(estimate.beta, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_beta_no_overlap() {
        let ticker = ReturnSeries::from_pairs("LATE", [(d(100), 0.01), (d(101), 0.02)]).unwrap();
        let err = compute_beta(&ticker, &market()).unwrap_err();
        assert!(matches!(err, FaroError::NoOverlap { ref symbol, .. } if symbol == "LATE"));
    }

    #[test]
    fn test_beta_single_shared_date() {
        let ticker = ReturnSeries::from_pairs("ONE", [(d(0), 0.01)]).unwrap();
        let err = compute_beta(&ticker, &market()).unwrap_err();
        assert!(matches!(err, FaroError::InsufficientData { .. }));
    }

    #[test]
    fn test_beta_zero_variance_benchmark() {
        let flat_prices = PriceSeries::from_pairs("FLAT", (0..10).map(|i| (d(i), 4000.0))).unwrap();
        let flat = compute_returns(&flat_prices).unwrap();

        for ticker in [returns("A", &[0.01; 9]), market()] {
            let err = compute_beta(&ticker, &flat).unwrap_err();
            assert!(matches!(err, FaroError::ZeroVariance { .. }));
        }
    }

    #[test]
    fn test_benchmark_variance() {
        assert!(benchmark_variance(&market()).unwrap() > 0.0);

        let flat = returns("FLAT", &[0.0, 0.0, 0.0]);
        assert!(matches!(
            benchmark_variance(&flat).unwrap_err(),
            FaroError::ZeroVariance { observations: 3, .. }
        ));

        let short = returns("SHORT", &[0.01]);
        assert!(matches!(
            benchmark_variance(&short).unwrap_err(),
            FaroError::InsufficientData { .. }
        ));
    }
}
