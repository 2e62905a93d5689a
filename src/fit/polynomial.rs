use crate::{
    display::{EquationDisplay, DEFAULT_PRECISION},
    error::Result,
    fit::{check_sample, least_squares_polynomial, CurveModel},
    statistics::{self, ErrorStats},
    value::Value,
    Polynomial,
};

/// Least-squares polynomial fitted to a sample.
///
/// Holds the fitted [`Polynomial`], the error statistics of the fit against the sample,
/// and the rendered equation.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit<T: Value = f64> {
    polynomial: Polynomial<'static, T>,
    stats: ErrorStats<T>,
    equation: String,
}
impl<T: Value> PolynomialFit<T> {
    /// The fitted polynomial.
    #[must_use]
    pub fn polynomial(&self) -> &Polynomial<'static, T> {
        &self.polynomial
    }

    /// Fitted coefficients, highest power first. There are always `degree + 1` of them.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        self.polynomial.coefficients()
    }

    /// Degree of the fitted polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.polynomial.degree()
    }

    /// Consumes the fit, returning the underlying polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Polynomial<'static, T> {
        self.polynomial
    }
}

impl<T: Value> CurveModel<T> for PolynomialFit<T> {
    fn y(&self, x: T) -> T {
        self.polynomial.y(x)
    }

    fn error_stats(&self) -> &ErrorStats<T> {
        &self.stats
    }

    fn equation(&self) -> &str {
        &self.equation
    }
}

impl<T: Value> std::fmt::Display for PolynomialFit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation)
    }
}

/// Fits a polynomial of the given degree to the sample by ordinary least squares.
///
/// `degree = 0` fits a constant, the mean of `ys`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// X[i, j] = x_i^(d - j)         for j = 0..=d
/// c = argmin ||X·c - y||²        (solved with SVD)
/// y_fit_i = c_0·x_i^d + … + c_d  (Horner)
/// ```
/// </div>
///
/// # Errors
/// - [`crate::error::Error::InvalidInput`] if the sample is empty, mismatched or not finite.
/// - [`crate::error::Error::UnderdeterminedFit`] if `degree >= xs.len()`, or if repeated
///   x-values leave fewer distinct points than coefficients.
/// - [`crate::error::Error::Algebra`] if the solver fails.
///
/// # Example
/// ```
/// # use curvefit::{fit_polynomial, CurveModel};
/// let fit = fit_polynomial(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0], 1).unwrap();
/// assert_eq!(fit.equation(), "y = 2.00000x^1 + 0.00000x^0");
/// assert!(fit.error_stats().max_abs_error < 1e-9);
/// ```
pub fn fit_polynomial<T: Value>(xs: &[T], ys: &[T], degree: usize) -> Result<PolynomialFit<T>> {
    check_sample(xs, ys)?;

    let coefficients = least_squares_polynomial(xs, ys, degree)?;
    let polynomial = Polynomial::new(coefficients)?;

    let predicted = polynomial.solve(xs.iter().copied());
    let stats = statistics::error_stats(ys, &predicted)?;
    let equation = polynomial.equation_with_precision(DEFAULT_PRECISION);

    tracing::debug!(
        degree,
        points = xs.len(),
        mae = %stats.mean_abs_error,
        "fitted polynomial"
    );

    Ok(PolynomialFit {
        polynomial,
        stats,
        equation,
    })
}
