//! Utilities for displaying fitted equations
//!
//! Numeric evaluation never rounds; this module is the only place values are rounded,
//! at the moment they are turned into text.
//!
//! # Key Concepts
//! - **[`EquationDisplay`]**: Trait for models that can render themselves as `"y = ..."`.
//! - **[`Term`]**: A single rendered term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Layout
//! Terms are joined the same way for every model:
//! - The first term, and every negative term, is preceded by a single space.
//! - Every other term is preceded by `" + "`.
//!
//! So `2x - 3` at the default precision renders as `y = 2.00000x^1 -3.00000x^0`.
use std::fmt::Write;

use crate::value::Value;

/// Default number of fractional digits used when rendering equations and statistics
pub const DEFAULT_PRECISION: usize = 5;

/// Trait for formatting fitted models as human-readable equations.
///
/// Implementors produce their terms in display order; the provided methods
/// assemble them into a full `"y = ..."` equation.
pub trait EquationDisplay<T: Value> {
    /// Renders the terms of the equation at the given precision, in display order.
    fn equation_terms(&self, precision: usize) -> Vec<Term>;

    /// Writes the full equation into the provided buffer.
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    fn format_equation<B: Write>(&self, buffer: &mut B, precision: usize) -> std::fmt::Result {
        write!(buffer, "y =")?;

        let terms = self.equation_terms(precision);
        if terms.is_empty() {
            return write!(buffer, " 0");
        }

        for (i, term) in terms.into_iter().enumerate() {
            match term.sign {
                Sign::Negative => write!(buffer, " {}{}", term.sign.char(), term.body)?,
                Sign::Positive if i == 0 => write!(buffer, " {}", term.body)?,
                Sign::Positive => write!(buffer, " + {}", term.body)?,
            }
        }

        Ok(())
    }

    /// Returns the equation rendered with `precision` fractional digits.
    fn equation_with_precision(&self, precision: usize) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail
        let _ = self.format_equation(&mut output, precision);
        output
    }
}

/// Represents the sign of a rendered term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// Zero, including negative zero, is positive.
    ///
    /// # Example
    /// ```
    /// # use curvefit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// assert_eq!(Sign::from_coef(-0.0), Sign::Positive);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef < T::zero() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// Represents a single term of an equation for display purposes.
///
/// The body never carries the sign; it is applied when terms are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term (e.g., `"2.00000x^2"`).
    pub body: String,
}

impl Term {
    /// Creates a new term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Creates a term from a coefficient and the text that follows it.
    ///
    /// The sign is taken from the coefficient after rounding, so a value that rounds
    /// to zero is shown as a positive zero.
    ///
    /// # Example
    /// ```
    /// # use curvefit::display::{Term, Sign};
    /// let term = Term::from_coef(-1.234_567, 5, "x^1");
    /// assert_eq!(term.sign, Sign::Negative);
    /// assert_eq!(term.body, "1.23457x^1");
    /// ```
    pub fn from_coef<T: Value>(coef: T, precision: usize, suffix: &str) -> Self {
        let coef = round_to(coef, precision);
        let body = format!("{}{suffix}", format_coefficient(coef, precision));
        Self::new(Sign::from_coef(coef), body)
    }
}

/// Rounds a value to `precision` fractional digits, half away from zero.
///
/// Negative zero is normalized to zero.
///
/// # Example
/// ```
/// # use curvefit::display::round_to;
/// assert_eq!(round_to(2.000_004_9, 5), 2.0);
/// assert_eq!(round_to(-0.000_001, 5), 0.0);
/// assert!(round_to(-0.000_001f64, 5).is_sign_positive());
/// ```
#[allow(clippy::float_cmp)]
pub fn round_to<T: Value>(value: T, precision: usize) -> T {
    let Ok(exponent) = i32::try_from(precision) else {
        return value;
    };

    let scale = Value::powi(T::from_positive_int(10), exponent);
    let rounded = (value * scale).round_half_away() / scale;

    if rounded == T::zero() {
        T::zero()
    } else {
        rounded
    }
}

/// Formats the magnitude of a coefficient with a fixed number of fractional digits.
///
/// # Example
/// ```
/// # use curvefit::display::format_coefficient;
/// assert_eq!(format_coefficient(2.5, 5), "2.50000");
/// assert_eq!(format_coefficient(-2.5, 2), "2.50");
/// ```
pub fn format_coefficient<T: Value>(coef: T, precision: usize) -> String {
    format!("{:.precision$}", Value::abs(round_to(coef, precision)))
}

/// Formats a value with its sign and a fixed number of fractional digits.
///
/// Used for reporting statistics such as the mean or the maximum error.
///
/// # Example
/// ```
/// # use curvefit::display::format_value;
/// assert_eq!(format_value(-1.0 / 3.0, 5), "-0.33333");
/// assert_eq!(format_value(-0.000_000_1, 3), "0.000");
/// ```
pub fn format_value<T: Value>(value: T, precision: usize) -> String {
    format!("{:.precision$}", round_to(value, precision))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    struct DummyModel(Vec<f64>);

    impl EquationDisplay<f64> for DummyModel {
        fn equation_terms(&self, precision: usize) -> Vec<Term> {
            let degree = self.0.len() - 1;
            self.0
                .iter()
                .enumerate()
                .map(|(i, &c)| Term::from_coef(c, precision, &format!("x^{}", degree - i)))
                .collect()
        }
    }

    struct EmptyModel;

    impl EquationDisplay<f64> for EmptyModel {
        fn equation_terms(&self, _: usize) -> Vec<Term> {
            vec![]
        }
    }

    #[test]
    fn test_sign_from_coef() {
        assert_eq!(Sign::from_coef(1.0), Sign::Positive);
        assert_eq!(Sign::from_coef(-1.0), Sign::Negative);
        assert_eq!(Sign::from_coef(0.0), Sign::Positive);
    }

    #[test]
    fn test_sign_char() {
        assert_eq!(Sign::Positive.char(), '+');
        assert_eq!(Sign::Negative.char(), '-');
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_565_1, 5), 1.234_57);
        assert_eq!(round_to(-1.234_565_1, 5), -1.234_57);
        assert_eq!(round_to(7.0, 0), 7.0);
        assert!(round_to(-1e-12f64, 5).is_sign_positive());
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(2.0, 5), "2.00000");
        assert_eq!(format_coefficient(-3.25, 5), "3.25000");
        assert_eq!(format_coefficient(-1e-9, 5), "0.00000");
    }

    #[test]
    fn test_format_linear_equation() {
        let eq = DummyModel(vec![2.0, 0.0]).equation_with_precision(DEFAULT_PRECISION);
        assert_eq!(eq, "y = 2.00000x^1 + 0.00000x^0");
    }

    #[test]
    fn test_format_negative_terms() {
        let eq = DummyModel(vec![-1.5, 2.0, -3.0]).equation_with_precision(DEFAULT_PRECISION);
        assert_eq!(eq, "y = -1.50000x^2 + 2.00000x^1 -3.00000x^0");
    }

    #[test]
    fn test_format_near_zero_is_not_negative() {
        let eq = DummyModel(vec![2.0, -4e-16]).equation_with_precision(DEFAULT_PRECISION);
        assert_eq!(eq, "y = 2.00000x^1 + 0.00000x^0");
    }

    #[test]
    fn test_format_constant() {
        let eq = DummyModel(vec![4.2]).equation_with_precision(2);
        assert_eq!(eq, "y = 4.20x^0");
    }

    #[test]
    fn test_format_no_terms() {
        assert_eq!(EmptyModel.equation_with_precision(5), "y = 0");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0, 5), "3.00000");
        assert_eq!(format_value(2f64.sqrt(), 5), "1.41421");
    }
}
