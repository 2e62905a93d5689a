//! Functions and tools for evaluating fits
//!
//! This module holds the error analysis shared by every fitter, along with the
//! descriptive statistics used by the distribution estimator.
//!
//! # Error Metrics
//! - [`error_stats`]: Maximum, minimum and mean absolute error between observed and predicted values.
//! - [`residuals`]: Element-wise `actual - predicted`.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//! - [`stddev_and_mean`]: Population standard deviation and mean of a dataset.
//!
//! # Examples
//!
//! ```rust
//! use curvefit::statistics::error_stats;
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.5, 2.0, 2.0];
//!
//! let stats = error_stats(&y, &y_fit).unwrap();
//! assert_eq!(stats.max_abs_error, 1.0);
//! assert_eq!(stats.min_abs_error, 0.0);
//! assert_eq!(stats.mean_abs_error, 0.5);
//! ```
use crate::{
    error::{Error, Result},
    value::Value,
};

/// Summary of the absolute residuals of a fit, in the units of the observed values.
///
/// Always satisfies `0 <= min_abs_error <= mean_abs_error <= max_abs_error`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats<T: Value = f64> {
    /// Largest `|actual - predicted|`
    pub max_abs_error: T,

    /// Smallest `|actual - predicted|`
    pub min_abs_error: T,

    /// Mean of `|actual - predicted|` (MAE)
    pub mean_abs_error: T,
}

/// Computes the residuals `actual - predicted` for each pair of values.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if the slices differ in length or are empty.
pub fn residuals<T: Value>(actual: &[T], predicted: &[T]) -> Result<Vec<T>> {
    if actual.len() != predicted.len() {
        return Err(Error::InvalidInput(format!(
            "{} observed values but {} predicted values",
            actual.len(),
            predicted.len()
        )));
    } else if actual.is_empty() {
        return Err(Error::InvalidInput("no values to compare".to_string()));
    }

    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| a - p)
        .collect())
}

/// Computes the maximum, minimum and mean absolute error between observed and predicted values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// r_i = y_i - y_fit_i
/// max = max |r_i|, min = min |r_i|, MAE = (Σ |r_i|) / N
/// ```
/// </div>
///
/// # Parameters
/// - `actual`: Observed values.
/// - `predicted`: Values predicted by the model, in the same order.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if the slices differ in length or are empty.
///
/// # Example
/// ```rust
/// # use curvefit::statistics::error_stats;
/// let stats = error_stats(&[2.0, 4.0], &[2.0, 4.0]).unwrap();
/// assert_eq!(stats.max_abs_error, 0.0);
/// ```
pub fn error_stats<T: Value>(actual: &[T], predicted: &[T]) -> Result<ErrorStats<T>> {
    let residuals = residuals(actual, predicted)?;

    let mut max = T::zero();
    let mut min = T::infinity();
    let mut total = T::zero();
    for r in residuals.iter().map(|r| Value::abs(*r)) {
        max = nalgebra::RealField::max(max, r);
        min = nalgebra::RealField::min(min, r);
        total += r;
    }

    let n = T::try_cast(residuals.len())?;
    Ok(ErrorStats {
        max_abs_error: max,
        min_abs_error: min,
        mean_abs_error: total / n,
    })
}

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// Returns NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = curvefit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let data: Vec<_> = data.collect();
    let count = T::from_positive_int(data.len());

    let mut sum = T::zero();
    for &value in &data {
        sum += value;
    }
    if sum.is_real() {
        return sum / count;
    }

    // The running sum overflowed, so average the scaled-down values instead
    let mut mean = T::zero();
    for value in data {
        mean += value / count;
    }
    mean
}

/// Computes the standard deviation of a sequence of values.
/// - Uses the population formula (divides by `N`) rather than `N-1`.
///
/// This function also returns the mean, for performance reasons.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ = sqrt( (Σ (x_i - Mean)²) / N )
/// ```
/// </div>
///
/// # Returns
/// `(standard_deviation, mean)`. Both are NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0f64, 2.0, 3.0, 4.0, 5.0];
/// let (s, m) = curvefit::statistics::stddev_and_mean(values.into_iter());
/// assert_eq!(m, 3.0);
/// assert!((s - 2f64.sqrt()).abs() < 1e-12);
/// ```
pub fn stddev_and_mean<T: Value>(data: impl Iterator<Item = T>) -> (T, T) {
    let data: Vec<_> = data.collect();
    let mean = mean(data.iter().copied());

    // Squares are taken relative to the largest deviation so they cannot overflow
    let peak = data.iter().fold(T::zero(), |peak, &v| {
        nalgebra::RealField::max(peak, Value::abs(v - mean))
    });
    let scale = if peak > T::zero() && peak.is_real() {
        peak
    } else {
        T::one()
    };

    let mut sum_sq_diff = T::zero();
    let mut count = T::zero();
    for value in data {
        sum_sq_diff += Value::powi((value - mean) / scale, 2);
        count += T::one();
    }
    let dev = scale * (sum_sq_diff / count).sqrt();

    (dev, mean)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn error_stats_exact_prediction_is_zero() {
        let y = vec![1.0, -2.0, 3.5];
        let stats = error_stats(&y, &y).unwrap();
        assert_eq!(stats.max_abs_error, 0.0);
        assert_eq!(stats.min_abs_error, 0.0);
        assert_eq!(stats.mean_abs_error, 0.0);
    }

    #[test]
    fn error_stats_simple_case() {
        // residuals: [1, -2, 3] -> abs [1, 2, 3]
        let y = vec![2.0, 0.0, 6.0];
        let y_fit = vec![1.0, 2.0, 3.0];
        let stats = error_stats(&y, &y_fit).unwrap();
        assert_eq!(stats.max_abs_error, 3.0);
        assert_eq!(stats.min_abs_error, 1.0);
        assert_eq!(stats.mean_abs_error, 2.0);
    }

    #[test]
    fn error_stats_ordering_holds() {
        let y = vec![0.3, 1.7, -4.2, 9.9, 0.0, 2.2];
        let y_fit = vec![0.1, 2.0, -4.0, 7.5, 0.4, 2.2];
        let stats = error_stats(&y, &y_fit).unwrap();
        assert!(stats.min_abs_error >= 0.0);
        assert!(stats.min_abs_error <= stats.mean_abs_error);
        assert!(stats.mean_abs_error <= stats.max_abs_error);
    }

    #[test]
    fn error_stats_single_point() {
        let stats = error_stats(&[5.0], &[3.5]).unwrap();
        assert_eq!(stats.max_abs_error, 1.5);
        assert_eq!(stats.min_abs_error, 1.5);
        assert_eq!(stats.mean_abs_error, 1.5);
    }

    #[test]
    fn error_stats_rejects_mismatch_and_empty() {
        assert!(matches!(
            error_stats(&[1.0, 2.0], &[1.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            error_stats::<f64>(&[], &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn residuals_are_actual_minus_predicted() {
        let r = residuals(&[3.0, 1.0], &[1.0, 4.0]).unwrap();
        assert_eq!(r, vec![2.0, -3.0]);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(vec![1.0, 2.0, 3.0, 4.0].into_iter()), 2.5);
        assert!(mean(Vec::<f64>::new().into_iter()).is_nan());
    }

    #[test]
    fn stddev_is_population() {
        let (s, m) = stddev_and_mean(vec![1.0, 2.0, 3.0, 4.0, 5.0].into_iter());
        assert_eq!(m, 3.0);
        assert_close!(s, 2f64.sqrt());

        let (s, _) = stddev_and_mean(vec![1.0, 2.0, 3.0].into_iter());
        assert_close!(s, 0.816_496_580_927_726);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let data = vec![1e300f64, 2e300, 3e300, 1.7e308, 1.7e308];
        let m = mean(data.iter().copied());
        assert!(m.is_finite());
        assert_close!(m / 1e308, 0.680_000_012);

        let (s, m) = stddev_and_mean(vec![1e300f64, 2e300, 3e300].into_iter());
        assert_close!(m / 1e300, 2.0);
        assert_close!(s / 1e300, 0.816_496_580_927_726);
    }

    #[test]
    fn stddev_of_constant_is_zero() {
        let (s, m) = stddev_and_mean(vec![4.0; 6].into_iter());
        assert_eq!(s, 0.0);
        assert_eq!(m, 4.0);
    }
}
