//! Period-over-period returns.

use faro_traits::{FaroError, Observation, PriceSeries, Result, ReturnSeries};

/// Minimum number of prices needed to form one return.
pub const MIN_PRICE_OBSERVATIONS: usize = 2;

/// A price can anchor a return only if it is finite and strictly positive.
fn is_usable_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Compute simple returns `price[i] / price[i-1] - 1` from a price series.
///
/// The return is dated at `price[i]`. Steps where either price is zero,
/// negative or missing produce no row, so no NaN reaches later moments.
///
/// # Errors
///
/// Returns [`FaroError::InsufficientData`] when the series has fewer than
/// two observations.
///
/// # Example
///
/// ```
/// use faro_capm::compute_returns;
/// use faro_traits::{Date, PriceSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let prices = PriceSeries::from_pairs("AAPL", [(d(1), 100.0), (d(2), 110.0), (d(3), 99.0)]).unwrap();
/// let returns = compute_returns(&prices).unwrap();
///
/// assert_eq!(returns.len(), 2);
/// assert!((returns.values()[0] - 0.10).abs() < 1e-12);
/// ```
pub fn compute_returns(prices: &PriceSeries) -> Result<ReturnSeries> {
    if prices.len() < MIN_PRICE_OBSERVATIONS {
        return Err(FaroError::insufficient(
            prices.symbol(),
            format!(
                "{} price observation(s), need at least {MIN_PRICE_OBSERVATIONS}",
                prices.len()
            ),
        ));
    }

    let returns = prices
        .observations()
        .windows(2)
        .filter_map(|w| {
            let (prev, cur) = (w[0].value, w[1].value);
            (is_usable_price(prev) && is_usable_price(cur))
                .then(|| Observation::new(w[1].date, cur / prev - 1.0))
        })
        .collect();

    ReturnSeries::new(prices.symbol(), returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use faro_traits::Date;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2022, 3, day).unwrap()
    }

    fn series(values: &[f64]) -> PriceSeries {
        PriceSeries::from_pairs(
            "TEST",
            values.iter().enumerate().map(|(i, &v)| (d(i as u32 + 1), v)),
        )
        .unwrap()
    }

    #[test]
    fn test_returns_basic() {
        let returns = compute_returns(&series(&[100.0, 110.0, 99.0])).unwrap();
        let values = returns.values();

        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(values[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_returns_length_is_one_less() {
        let prices = series(&[10.0, 11.0, 12.0, 11.5, 13.0]);
        let returns = compute_returns(&prices).unwrap();
        assert_eq!(returns.len(), prices.len() - 1);
        assert_eq!(returns.symbol(), "TEST");
    }

    #[test]
    fn test_returns_dated_at_later_price() {
        let returns = compute_returns(&series(&[1.0, 2.0])).unwrap();
        assert_eq!(returns.observations()[0].date, d(2));
    }

    #[test]
    fn test_returns_drop_missing_price() {
        let returns = compute_returns(&series(&[100.0, f64::NAN, 102.0, 103.0])).unwrap();

        // Both steps touching the missing price are dropped
        assert_eq!(returns.len(), 1);
        assert_eq!(returns.observations()[0].date, d(4));
        assert!(returns.values().iter().all(|r| r.is_finite()));
    }

    #[test]
    fn test_returns_drop_zero_price() {
        let returns = compute_returns(&series(&[100.0, 0.0, 50.0, 55.0])).unwrap();
        assert_eq!(returns.len(), 1);
        assert_relative_eq!(returns.values()[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_returns_insufficient_data() {
        let err = compute_returns(&series(&[100.0])).unwrap_err();
        assert!(matches!(err, FaroError::InsufficientData { .. }));

        let err = compute_returns(&series(&[])).unwrap_err();
        assert!(matches!(err, FaroError::InsufficientData { .. }));
    }
}
