use std::ops::RangeInclusive;

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    error::{Error, Result},
    statistics::ErrorStats,
    value::{EvenlySpaced, IntClampedCast, Value},
};

mod exponential;
mod logarithmic;
mod polynomial;

pub use exponential::{fit_exponential, ExponentialFit};
pub use logarithmic::{fit_natural_log, LogarithmicFit};
pub use polynomial::{fit_polynomial, PolynomialFit};

/// Number of points sampled across the plot range when drawing a fitted curve
pub const DEFAULT_CURVE_POINTS: usize = 1000;

/// Upper bound on the iterations of the singular value decomposition
const MAX_SVD_ITERATIONS: usize = 10_000;

/// One sample of a fitted curve together with its mean-absolute-error band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint<T: Value = f64> {
    /// Input value
    pub x: T,

    /// Fitted value at `x`
    pub y: T,

    /// `y - MAE`
    pub lower: T,

    /// `y + MAE`
    pub upper: T,
}

/// A fitted curve model.
///
/// Implemented by [`PolynomialFit`], [`ExponentialFit`] and [`LogarithmicFit`], so a
/// caller can evaluate, describe and draw any of them without knowing which model was chosen.
pub trait CurveModel<T: Value> {
    /// Evaluates the fitted model at `x`.
    ///
    /// Returns NaN where the model is undefined, such as `ln(x)` for `x <= 0`.
    fn y(&self, x: T) -> T;

    /// Error statistics of the fit against the data it was fitted to.
    fn error_stats(&self) -> &ErrorStats<T>;

    /// Human-readable equation of the fit, at the default precision.
    fn equation(&self) -> &str;

    /// Evaluates the model at each of the given x-values.
    fn predict(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&x| self.y(x)).collect()
    }

    /// Samples the curve on `points` evenly spaced x-values across `range`, with a band of
    /// one mean absolute error on either side.
    ///
    /// Points where the model is undefined are skipped.
    ///
    /// # Example
    /// ```
    /// # use curvefit::{fit_polynomial, CurveModel};
    /// let fit = fit_polynomial(&[0.0, 1.0, 2.0], &[1.0, 2.0, 4.0], 1).unwrap();
    /// let band = fit.error_band(-2.0..=4.0, 100);
    /// assert_eq!(band.len(), 100);
    /// assert!(band.iter().all(|p| p.lower <= p.y && p.y <= p.upper));
    /// ```
    fn error_band(&self, range: RangeInclusive<T>, points: usize) -> Vec<BandPoint<T>> {
        let mae = self.error_stats().mean_abs_error;
        EvenlySpaced::new(range, points)
            .filter_map(|x| {
                let y = self.y(x);
                y.is_real().then_some(BandPoint {
                    x,
                    y,
                    lower: y - mae,
                    upper: y + mae,
                })
            })
            .collect()
    }
}

/// Checks that a sample is usable by any fitter: equal lengths, not empty, all finite.
pub(crate) fn check_sample<T: Value>(xs: &[T], ys: &[T]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(Error::InvalidInput(format!(
            "{} x-values but {} y-values",
            xs.len(),
            ys.len()
        )));
    } else if xs.is_empty() {
        return Err(Error::InvalidInput("the sample is empty".to_string()));
    }

    if let Some(bad) = xs.iter().chain(ys).find(|v| !v.is_real()) {
        return Err(Error::InvalidInput(format!(
            "the sample contains a non-finite value ({bad})"
        )));
    }

    Ok(())
}

/// Builds the Vandermonde matrix for `xs`, highest power in the first column.
fn create_matrix<T: Value>(xs: &[T], degree: usize) -> DMatrix<T> {
    let k = degree + 1;
    let mut bigx = DMatrix::zeros(xs.len(), k);
    for (mut row, &x) in bigx.row_iter_mut().zip(xs) {
        for j in 0..k {
            let power = degree - j;
            row[j] = match power {
                0 => T::one(),
                1 => x,
                _ => Value::powi(x, power.clamped_cast()),
            };
        }
    }

    bigx
}

/// Scales every column of the matrix to unit length, returning the scale factors.
///
/// Keeps the singular values comparable when the columns are powers of large x-values.
/// Each column is first divided by its largest magnitude so the norm cannot overflow.
/// The two factors are kept apart for the same reason: `peak * norm` may not be finite.
fn normalize_columns<T: Value>(matrix: &mut DMatrix<T>) -> Vec<(T, T)> {
    let mut scales = Vec::with_capacity(matrix.ncols());
    for mut column in matrix.column_iter_mut() {
        let peak = column
            .iter()
            .fold(T::zero(), |peak, &v| nalgebra::RealField::max(peak, Value::abs(v)));
        if peak > T::zero() {
            column /= peak;
        }

        let norm = column.norm();
        if norm > T::zero() {
            column /= norm;
        }

        scales.push((
            if peak > T::zero() { peak } else { T::one() },
            if norm > T::zero() { norm } else { T::one() },
        ));
    }

    scales
}

/// Solves the least-squares system `matrix * c = b` using SVD.
///
/// Fails with [`Error::UnderdeterminedFit`] if the matrix is rank deficient, since the
/// solution would not be unique.
fn solve_matrix<T: Value>(matrix: DMatrix<T>, b: &DVector<T>, degree: usize) -> Result<Vec<T>> {
    let (rows, cols) = matrix.shape();

    // The decomposition does not converge on NaN or infinite entries
    if matrix.iter().chain(b.iter()).any(|v| !v.is_real()) {
        return Err(Error::Algebra("non-finite value in the design matrix"));
    }

    // Calculate the singular value decomposition of the matrix
    let machine_epsilon = T::epsilon();
    let decomp = SVD::try_new_unordered(matrix, true, true, machine_epsilon, MAX_SVD_ITERATIONS)
        .ok_or(Error::Algebra("singular value decomposition did not converge"))?;

    // Calculate epsilon value
    // ~= machine_epsilon * max(size) * max_singular
    let max_size = rows.max(cols);
    let sigma_max = decomp.singular_values.max();
    let epsilon = machine_epsilon * T::try_cast(max_size)? * sigma_max;

    let rank = decomp.rank(epsilon);
    tracing::trace!(rows, cols, rank, "solving least-squares system");
    if rank < cols {
        return Err(Error::UnderdeterminedFit {
            degree,
            points: rows,
        });
    }

    // Solve for X in `SVD * X = b`
    let big_x = decomp.solve(b, epsilon).map_err(Error::Algebra)?;
    let coefficients: Vec<_> = big_x.data.into();

    // Make sure the coefficients are valid
    if coefficients.iter().any(|c| !c.is_real()) {
        return Err(Error::Algebra("non-finite value in coefficients"));
    }

    Ok(coefficients)
}

/// Ordinary least-squares polynomial regression.
///
/// Returns `degree + 1` coefficients, highest power first.
///
/// The sample must already have passed [`check_sample`].
pub(crate) fn least_squares_polynomial<T: Value>(
    xs: &[T],
    ys: &[T],
    degree: usize,
) -> Result<Vec<T>> {
    if degree >= xs.len() {
        return Err(Error::UnderdeterminedFit {
            degree,
            points: xs.len(),
        });
    }

    let mut matrix = create_matrix(xs, degree);
    let scales = normalize_columns(&mut matrix);
    let b = DVector::from_column_slice(ys);

    let scaled = solve_matrix(matrix, &b, degree)?;
    let coefficients: Vec<T> = scaled
        .into_iter()
        .zip(scales)
        .map(|(c, (peak, norm))| c / norm / peak)
        .collect();

    if coefficients.iter().any(|c| !c.is_real()) {
        return Err(Error::Algebra("non-finite value in coefficients"));
    }

    Ok(coefficients)
}

/// Fits a straight line `y = slope * x + intercept`, returning `(slope, intercept)`.
pub(crate) fn least_squares_line<T: Value>(xs: &[T], ys: &[T]) -> Result<(T, T)> {
    match least_squares_polynomial(xs, ys, 1)?.as_slice() {
        &[slope, intercept] => Ok((slope, intercept)),
        _ => Err(Error::Algebra("expected two coefficients for a line")),
    }
}
