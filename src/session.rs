//! Interactive fitting state
//!
//! A [`Session`] owns the sample being built up by the user and the currently selected
//! [`FitMode`]. Tokens typed by the user are validated before they reach the sample, and
//! [`Session::fit`] runs whichever model is selected.
//!
//! # Example
//! ```rust
//! use curvefit::{CurveModel, FitMode, FitOutcome, Session};
//!
//! let mut session = Session::new();
//! session.append_point("0", "1").unwrap();
//! session.append_point("1", "3").unwrap();
//! session.append_point("2", "5").unwrap();
//!
//! session.set_mode(FitMode::Polynomial { degree: 1 });
//! let FitOutcome::Polynomial(fit) = session.fit().unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(fit.equation(), "y = 2.00000x^1 + 1.00000x^0");
//! ```
use std::io::BufRead;

use crate::{
    distribution::{summarize_distribution, DistributionSummary},
    error::{Error, Result},
    fit::{
        fit_exponential, fit_natural_log, fit_polynomial, CurveModel, ExponentialFit,
        LogarithmicFit, PolynomialFit,
    },
    sample::{Axis, Sample},
    validate,
    value::Value,
};

/// Minimum number of points a curve fit is attempted on
pub const MIN_CURVE_POINTS: usize = 2;

/// The model [`Session::fit`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Least-squares polynomial of the given degree
    Polynomial {
        /// Degree of the polynomial
        degree: usize,
    },

    /// `y = a·e^(b·x)`
    Exponential,

    /// `y = a + b·ln(x)`
    NaturalLogarithmic,

    /// Normal-distribution summary of one axis
    StatisticalDistribution(Axis),
}
impl Default for FitMode {
    fn default() -> Self {
        Self::Polynomial { degree: 1 }
    }
}

impl std::fmt::Display for FitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitMode::Polynomial { degree } => write!(f, "polynomial (degree {degree})"),
            FitMode::Exponential => write!(f, "exponential"),
            FitMode::NaturalLogarithmic => write!(f, "natural logarithmic"),
            FitMode::StatisticalDistribution(axis) => {
                write!(f, "statistical distribution ({axis} axis)")
            }
        }
    }
}

/// Result of [`Session::fit`], tagged by the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome<T: Value = f64> {
    /// A polynomial fit
    Polynomial(PolynomialFit<T>),

    /// An exponential fit
    Exponential(ExponentialFit<T>),

    /// A natural-logarithmic fit
    NaturalLog(LogarithmicFit<T>),

    /// A distribution summary
    Distribution(DistributionSummary<T>),
}
impl<T: Value> FitOutcome<T> {
    /// The fitted curve, or `None` for a distribution summary.
    #[must_use]
    pub fn curve(&self) -> Option<&dyn CurveModel<T>> {
        match self {
            FitOutcome::Polynomial(fit) => Some(fit),
            FitOutcome::Exponential(fit) => Some(fit),
            FitOutcome::NaturalLog(fit) => Some(fit),
            FitOutcome::Distribution(_) => None,
        }
    }

    /// The distribution summary, or `None` for a curve fit.
    #[must_use]
    pub fn distribution(&self) -> Option<&DistributionSummary<T>> {
        match self {
            FitOutcome::Distribution(summary) => Some(summary),
            _ => None,
        }
    }
}

/// A sample under construction together with the selected fit mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<T: Value = f64> {
    sample: Sample<T>,
    mode: FitMode,
}
impl Session<f64> {
    /// Creates an empty session with the default mode, a straight line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
impl<T: Value> Default for Session<T> {
    fn default() -> Self {
        Self {
            sample: Sample::default(),
            mode: FitMode::default(),
        }
    }
}
impl<T: Value> Session<T> {
    /// Creates a session over an existing sample.
    pub fn with_sample(sample: Sample<T>, mode: FitMode) -> Self {
        Self { sample, mode }
    }

    /// Validates two raw tokens and appends them as a point.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if either token is not a finite number.
    /// The sample is unchanged on error.
    pub fn append_point(&mut self, x: &str, y: &str) -> Result<()> {
        let x = validate::parse_value(x)?;
        let y = validate::parse_value(y)?;
        self.sample.push(x, y)
    }

    /// Removes the most recently added point and returns it.
    ///
    /// # Errors
    /// Returns [`Error::NoData`] if the sample is empty.
    pub fn delete_last(&mut self) -> Result<(T, T)> {
        self.sample.pop().ok_or(Error::NoData)
    }

    /// Appends many points. Nothing is appended if any of them is invalid.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if any value is not finite.
    pub fn bulk_load(&mut self, points: impl IntoIterator<Item = (T, T)>) -> Result<()> {
        self.sample.extend(points)
    }

    /// Reads CSV text and appends its points. Nothing is appended if the import fails.
    ///
    /// See [`Sample::read_csv`] for the accepted format.
    ///
    /// # Errors
    /// Returns [`Error::Import`] or [`Error::Io`] if the CSV cannot be read.
    ///
    /// # Returns
    /// The number of points appended.
    pub fn import_csv(&mut self, reader: impl BufRead) -> Result<usize> {
        let imported = Sample::read_csv(reader)?;
        let count = imported.len();
        self.sample.extend(imported.points())?;
        Ok(count)
    }

    /// Removes every point.
    ///
    /// # Errors
    /// Returns [`Error::NoData`] if the sample is already empty.
    pub fn clear(&mut self) -> Result<()> {
        if self.sample.is_empty() {
            return Err(Error::NoData);
        }

        self.sample.clear();
        Ok(())
    }

    /// Selects the model [`Session::fit`] runs.
    pub fn set_mode(&mut self, mode: FitMode) {
        self.mode = mode;
    }

    /// The selected model.
    #[must_use]
    pub fn mode(&self) -> FitMode {
        self.mode
    }

    /// The current sample.
    #[must_use]
    pub fn sample(&self) -> &Sample<T> {
        &self.sample
    }

    /// Runs the selected model on the current sample.
    ///
    /// The session is not modified, whether or not the fit succeeds.
    ///
    /// # Errors
    /// - [`Error::InsufficientData`] if a curve mode is selected and the sample has fewer
    ///   than [`MIN_CURVE_POINTS`] points.
    /// - [`Error::NoData`] if the distribution mode is selected and the sample is empty.
    /// - Any error of the selected fitter.
    pub fn fit(&self) -> Result<FitOutcome<T>> {
        tracing::debug!(mode = %self.mode, points = self.sample.len(), "fitting");

        match self.mode {
            FitMode::Polynomial { degree } => {
                let (xs, ys) = self.curve_sample()?;
                fit_polynomial(xs, ys, degree).map(FitOutcome::Polynomial)
            }
            FitMode::Exponential => {
                let (xs, ys) = self.curve_sample()?;
                fit_exponential(xs, ys).map(FitOutcome::Exponential)
            }
            FitMode::NaturalLogarithmic => {
                let (xs, ys) = self.curve_sample()?;
                fit_natural_log(xs, ys).map(FitOutcome::NaturalLog)
            }
            FitMode::StatisticalDistribution(axis) => {
                if self.sample.is_empty() {
                    return Err(Error::NoData);
                }

                summarize_distribution(self.sample.axis(axis)).map(FitOutcome::Distribution)
            }
        }
    }

    fn curve_sample(&self) -> Result<(&[T], &[T])> {
        let found = self.sample.len();
        if found < MIN_CURVE_POINTS {
            return Err(Error::InsufficientData {
                required: MIN_CURVE_POINTS,
                found,
            });
        }

        Ok((self.sample.xs(), self.sample.ys()))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_close, assert_fit_error};

    fn line_session() -> Session {
        let mut session = Session::new();
        session
            .bulk_load(vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)])
            .unwrap();
        session
    }

    #[test]
    fn append_validates_tokens() {
        let mut session = Session::new();
        session.append_point(" 1.5 ", "-2e1").unwrap();
        assert_eq!(session.sample().xs(), &[1.5]);
        assert_eq!(session.sample().ys(), &[-20.0]);

        assert_fit_error!(session.append_point("abc", "1"), InvalidInput(_));
        assert_fit_error!(session.append_point("1", ""), InvalidInput(_));
        assert_fit_error!(session.append_point("inf", "1"), InvalidInput(_));
        assert_eq!(session.sample().len(), 1);
    }

    #[test]
    fn delete_last_and_clear() {
        let mut session = line_session();
        assert_eq!(session.delete_last().unwrap(), (3.0, 7.0));
        assert_eq!(session.sample().len(), 3);

        session.clear().unwrap();
        assert!(session.sample().is_empty());
        assert_fit_error!(session.clear(), NoData);
        assert_fit_error!(session.delete_last(), NoData);
    }

    #[test]
    fn import_csv_appends() {
        let mut session = line_session();
        let count = session.import_csv("x,y\n10,21\n11,23\n".as_bytes()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(session.sample().len(), 6);

        assert_fit_error!(session.import_csv("x,y\n12,oops\n".as_bytes()), Import { .. });
        assert_eq!(session.sample().len(), 6);
    }

    #[test]
    fn fit_dispatches_on_mode() {
        let mut session = line_session();

        let outcome = session.fit().unwrap();
        let FitOutcome::Polynomial(fit) = &outcome else {
            panic!("expected a polynomial fit, got {outcome:?}");
        };
        assert_eq!(fit.equation(), "y = 2.00000x^1 + 1.00000x^0");
        assert!(outcome.distribution().is_none());

        session.set_mode(FitMode::Exponential);
        assert!(matches!(session.fit().unwrap(), FitOutcome::Exponential(_)));

        // x = 0 is outside the logarithm's domain
        session.set_mode(FitMode::NaturalLogarithmic);
        assert_fit_error!(session.fit(), DomainError(_));

        session.set_mode(FitMode::StatisticalDistribution(Axis::Y));
        let outcome = session.fit().unwrap();
        assert!(outcome.curve().is_none());
        let summary = outcome.distribution().unwrap();
        assert_close!(summary.mean, 4.0);
        assert_close!(summary.std_dev, 5f64.sqrt());
    }

    #[test]
    fn curve_outcome_exposes_model() {
        let session = line_session();
        let outcome = session.fit().unwrap();
        let curve = outcome.curve().unwrap();
        assert_close!(curve.y(10.0), 21.0);
        assert_close!(curve.error_stats().mean_abs_error, 0.0);
    }

    #[test]
    fn curve_modes_need_two_points() {
        let mut session = Session::new();
        assert_fit_error!(
            session.fit(),
            InsufficientData {
                required: 2,
                found: 0
            }
        );

        session.append_point("1", "2").unwrap();
        for mode in [
            FitMode::Polynomial { degree: 0 },
            FitMode::Exponential,
            FitMode::NaturalLogarithmic,
        ] {
            session.set_mode(mode);
            assert_fit_error!(session.fit(), InsufficientData { found: 1, .. });
        }
        assert_eq!(session.sample().len(), 1);
    }

    #[test]
    fn distribution_mode_edge_cases() {
        let mut session = Session::new();
        session.set_mode(FitMode::StatisticalDistribution(Axis::X));
        assert_fit_error!(session.fit(), NoData);

        session.append_point("3", "1").unwrap();
        assert_fit_error!(session.fit(), DegenerateDistribution);
    }

    #[test]
    fn failed_fit_leaves_session_unchanged() {
        let mut session = line_session();
        session.set_mode(FitMode::Polynomial { degree: 9 });
        let before = session.clone();
        assert_fit_error!(session.fit(), UnderdeterminedFit { .. });
        assert_eq!(session, before);
    }
}
