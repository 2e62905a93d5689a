use crate::{
    display::{EquationDisplay, Term, DEFAULT_PRECISION},
    error::{Error, Result},
    fit::{check_sample, least_squares_line, CurveModel},
    statistics::{self, ErrorStats},
    value::Value,
};

/// Exponential curve `y = a·e^(b·x)` fitted to a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialFit<T: Value = f64> {
    a: T,
    b: T,
    stats: ErrorStats<T>,
    equation: String,
}
impl<T: Value> ExponentialFit<T> {
    /// Scale factor `a`, the value of the curve at `x = 0`. Always positive.
    #[must_use]
    pub fn a(&self) -> T {
        self.a
    }

    /// Growth rate `b`. Negative for decay.
    #[must_use]
    pub fn b(&self) -> T {
        self.b
    }
}

impl<T: Value> CurveModel<T> for ExponentialFit<T> {
    fn y(&self, x: T) -> T {
        self.a * (self.b * x).exp()
    }

    fn error_stats(&self) -> &ErrorStats<T> {
        &self.stats
    }

    fn equation(&self) -> &str {
        &self.equation
    }
}

impl<T: Value> EquationDisplay<T> for ExponentialFit<T> {
    fn equation_terms(&self, precision: usize) -> Vec<Term> {
        // The exponent keeps its own sign so the rate reads as e^(-0.5x)
        let rate = crate::display::format_value(self.b, precision);
        vec![Term::from_coef(
            self.a,
            precision,
            &format!(" * e^({rate}x)"),
        )]
    }
}

impl<T: Value> std::fmt::Display for ExponentialFit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation)
    }
}

/// Fits `y = a·e^(b·x)` to the sample by linear least squares on `ln(y)`.
///
/// The fit minimizes squared error in log space, so relative errors are weighted evenly;
/// the reported error statistics are computed on the raw `ys`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// ln(y) = ln(a) + b·x
/// (b, ln(a)) = least squares line through (x_i, ln(y_i))
/// a = e^ln(a)
/// ```
/// </div>
///
/// # Errors
/// - [`Error::InvalidInput`] if the sample is empty, mismatched or not finite.
/// - [`Error::DomainError`] if any `y <= 0`.
/// - [`Error::UnderdeterminedFit`] if fewer than two distinct x-values are present.
/// - [`Error::Algebra`] if the fitted parameters overflow.
///
/// # Example
/// ```
/// # use curvefit::{fit_exponential, CurveModel};
/// let xs = [0.0, 1.0, 2.0];
/// let ys: Vec<f64> = xs.iter().map(|x: &f64| 2.0 * (0.5 * x).exp()).collect();
/// let fit = fit_exponential(&xs, &ys).unwrap();
/// assert_eq!(fit.equation(), "y = 2.00000 * e^(0.50000x)");
/// ```
pub fn fit_exponential<T: Value>(xs: &[T], ys: &[T]) -> Result<ExponentialFit<T>> {
    check_sample(xs, ys)?;

    if let Some(bad) = ys.iter().find(|&&y| y <= T::zero()) {
        return Err(Error::DomainError(format!(
            "the exponential model needs every y > 0, found {bad}"
        )));
    }

    let log_ys: Vec<T> = ys.iter().map(|y| y.ln()).collect();
    let (b, intercept) = least_squares_line(xs, &log_ys)?;
    let a = intercept.exp();
    if !a.is_real() || !b.is_real() {
        return Err(Error::Algebra("exponential parameters are not finite"));
    }

    let predicted: Vec<T> = xs.iter().map(|&x| a * (b * x).exp()).collect();
    let stats = statistics::error_stats(ys, &predicted)?;

    let mut fit = ExponentialFit {
        a,
        b,
        stats,
        equation: String::new(),
    };
    fit.equation = fit.equation_with_precision(DEFAULT_PRECISION);

    tracing::debug!(
        a = %fit.a,
        b = %fit.b,
        points = xs.len(),
        mae = %fit.stats.mean_abs_error,
        "fitted exponential"
    );

    Ok(fit)
}
