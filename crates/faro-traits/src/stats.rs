//! Sample statistics used by the beta estimator.
//!
//! All moments use the sample (N-1) denominator so that covariance and
//! variance stay on the same footing and their ratio is unbiased by `N`.

use ndarray::Array1;

/// Arithmetic mean, or `None` for an empty array.
pub fn mean(values: &Array1<f64>) -> Option<f64> {
    values.mean()
}

/// Sample variance (N-1 denominator), or `None` with fewer than two values.
///
/// # Examples
///
/// ```
/// use faro_traits::stats::sample_variance;
/// use ndarray::array;
///
/// let var = sample_variance(&array![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert!((var - 5.0 / 3.0).abs() < 1e-12);
/// ```
pub fn sample_variance(values: &Array1<f64>) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.var(1.0))
}

/// Sample covariance (N-1 denominator) of two equally long arrays.
///
/// Returns `None` if the lengths differ or there are fewer than two pairs.
///
/// # Examples
///
/// ```
/// use faro_traits::stats::sample_covariance;
/// use ndarray::array;
///
/// let x = array![1.0, 2.0, 3.0];
/// let y = array![2.0, 4.0, 6.0];
/// assert!((sample_covariance(&x, &y).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn sample_covariance(x: &Array1<f64>, y: &Array1<f64>) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }

    let mx = x.mean()?;
    let my = y.mean()?;
    let cross = (x - mx) * (y - my);

    Some(cross.sum() / (n - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&array![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
        assert!(mean(&Array1::<f64>::zeros(0)).is_none());
    }

    #[test]
    fn test_sample_variance_basic() {
        let var = sample_variance(&array![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(var, 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_variance_constant_is_zero() {
        let var = sample_variance(&array![0.0, 0.0, 0.0]).unwrap();
        assert_eq!(var, 0.0);
    }

    #[test]
    fn test_sample_variance_single_value() {
        assert!(sample_variance(&array![42.0]).is_none());
    }

    #[test]
    fn test_covariance_matches_variance_on_self() {
        let x = array![0.01, -0.02, 0.015, 0.003];
        let cov = sample_covariance(&x, &x).unwrap();
        assert_relative_eq!(cov, sample_variance(&x).unwrap(), epsilon = 1e-15);
    }

    #[test]
    fn test_covariance_negative() {
        let x = array![1.0, 2.0, 3.0];
        let y = array![3.0, 2.0, 1.0];
        assert_relative_eq!(sample_covariance(&x, &y).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_covariance_length_mismatch() {
        assert!(sample_covariance(&array![1.0, 2.0], &array![1.0]).is_none());
    }
}
