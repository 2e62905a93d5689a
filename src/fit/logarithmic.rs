use crate::{
    display::{EquationDisplay, Term, DEFAULT_PRECISION},
    error::{Error, Result},
    fit::{check_sample, least_squares_line, CurveModel},
    statistics::{self, ErrorStats},
    value::Value,
};

/// Natural-logarithmic curve `y = a + b·ln(x)` fitted to a sample.
///
/// The curve is only defined for `x > 0`; [`CurveModel::y`] returns NaN elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicFit<T: Value = f64> {
    a: T,
    b: T,
    stats: ErrorStats<T>,
    equation: String,
}
impl<T: Value> LogarithmicFit<T> {
    /// Intercept `a`, the value of the curve at `x = 1`.
    #[must_use]
    pub fn a(&self) -> T {
        self.a
    }

    /// Coefficient `b` of `ln(x)`.
    #[must_use]
    pub fn b(&self) -> T {
        self.b
    }
}

impl<T: Value> CurveModel<T> for LogarithmicFit<T> {
    fn y(&self, x: T) -> T {
        if x <= T::zero() {
            return T::nan();
        }

        self.a + self.b * x.ln()
    }

    fn error_stats(&self) -> &ErrorStats<T> {
        &self.stats
    }

    fn equation(&self) -> &str {
        &self.equation
    }
}

impl<T: Value> EquationDisplay<T> for LogarithmicFit<T> {
    fn equation_terms(&self, precision: usize) -> Vec<Term> {
        vec![
            Term::from_coef(self.a, precision, ""),
            Term::from_coef(self.b, precision, "ln(x)"),
        ]
    }
}

impl<T: Value> std::fmt::Display for LogarithmicFit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation)
    }
}

/// Fits `y = a + b·ln(x)` to the sample by linear least squares of `y` on `ln(x)`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// u_i = ln(x_i)
/// (b, a) = least squares line through (u_i, y_i)
/// ```
/// </div>
///
/// # Errors
/// - [`Error::InvalidInput`] if the sample is empty, mismatched or not finite.
/// - [`Error::DomainError`] if any `x <= 0`.
/// - [`Error::UnderdeterminedFit`] if fewer than two distinct x-values are present.
///
/// # Example
/// ```
/// # use curvefit::{fit_natural_log, CurveModel};
/// let xs = [1.0, std::f64::consts::E, 10.0];
/// let ys: Vec<f64> = xs.iter().map(|x: &f64| 1.0 - 2.0 * x.ln()).collect();
/// let fit = fit_natural_log(&xs, &ys).unwrap();
/// assert_eq!(fit.equation(), "y = 1.00000 -2.00000ln(x)");
/// ```
pub fn fit_natural_log<T: Value>(xs: &[T], ys: &[T]) -> Result<LogarithmicFit<T>> {
    check_sample(xs, ys)?;

    if let Some(bad) = xs.iter().find(|&&x| x <= T::zero()) {
        return Err(Error::DomainError(format!(
            "the logarithmic model needs every x > 0, found {bad}"
        )));
    }

    let log_xs: Vec<T> = xs.iter().map(|x| x.ln()).collect();
    let (b, a) = least_squares_line(&log_xs, ys)?;

    let predicted: Vec<T> = log_xs.iter().map(|&u| a + b * u).collect();
    let stats = statistics::error_stats(ys, &predicted)?;

    let mut fit = LogarithmicFit {
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
        "fitted natural logarithm"
    );

    Ok(fit)
}
