use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    display::{EquationDisplay, Term, DEFAULT_PRECISION},
    error::{Error, Result},
    value::{EvenlySpaced, Value},
};

/// Represents a polynomial function `y(x) = c₀xᵈ + c₁xᵈ⁻¹ + … + c_d`.
///
/// Coefficients are stored **highest power first**, the same order a polynomial fit
/// reports them in.
///
/// This struct is not tied to any dataset, making it a canonical function that
/// can be evaluated for **any x-value**.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a new polynomial from coefficients ordered highest power first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if no coefficients are given.
    ///
    /// # Example
    /// ```
    /// # use curvefit::Polynomial;
    /// let poly = Polynomial::new(vec![3.0, 2.0, 1.0]).unwrap(); // 3x² + 2x + 1
    /// assert_eq!(poly.degree(), 2);
    /// ```
    pub fn new(coefficients: Vec<T>) -> Result<Self> {
        Self::from_cow(Cow::Owned(coefficients))
    }

    /// Creates a polynomial borrowing the given coefficients, ordered highest power first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if no coefficients are given.
    pub fn borrowed(coefficients: &'a [T]) -> Result<Self> {
        Self::from_cow(Cow::Borrowed(coefficients))
    }

    fn from_cow(coefficients: Cow<'a, [T]>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(Error::InvalidInput(
                "a polynomial needs at least one coefficient".to_string(),
            ));
        }

        Ok(Self { coefficients })
    }

    /// Converts the polynomial into an owned version with a `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> Polynomial<'static, T> {
        Polynomial {
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns the coefficients, highest power first.
    ///
    /// For example `y(x) = 2x^2 - 3x + 1` has coefficients `[2.0, -3.0, 1.0]`.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluates the polynomial at a given x-value, using Horner's method.
    ///
    /// # Example
    /// ```
    /// # use curvefit::Polynomial;
    /// let poly = Polynomial::new(vec![3.0, 2.0, 1.0]).unwrap(); // 3x² + 2x + 1
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        self.coefficients
            .iter()
            .fold(T::zero(), |acc, &coef| acc * x + coef)
    }

    /// Evaluates the polynomial at each of the given x-values.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<T> {
        x.into_iter().map(|x| self.y(x)).collect()
    }

    /// Evaluates the polynomial at `points` evenly spaced x-values across `range`.
    ///
    /// # Returns
    /// A `Vec` of `(x, y)` pairs.
    pub fn solve_range(&self, range: RangeInclusive<T>, points: usize) -> Vec<(T, T)> {
        EvenlySpaced::new(range, points)
            .map(|x| (x, self.y(x)))
            .collect()
    }

    /// Returns the equation at the default precision, e.g. `y = 2.00000x^1 + 1.00000x^0`.
    #[must_use]
    pub fn equation(&self) -> String {
        self.equation_with_precision(DEFAULT_PRECISION)
    }
}

impl<T: Value> EquationDisplay<T> for Polynomial<'_, T> {
    fn equation_terms(&self, precision: usize) -> Vec<Term> {
        let degree = self.degree();
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, &coef)| Term::from_coef(coef, precision, &format!("x^{}", degree - i)))
            .collect()
    }
}

impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}
