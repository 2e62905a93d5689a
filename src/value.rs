//! Numeric types and iteration utilities for curve fitting.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used in fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` and `abs` without method ambiguity.
//!   - `is_real` to reject NaN and infinities.
//!
//! # Iterators
//!
//! - [`EvenlySpaced`]: A fixed number of evenly spaced points over an inclusive
//!   range, useful for evaluation grids and histogram edges.
//!
//! # Example
//!
//! ```rust
//! use curvefit::value::{EvenlySpaced, Value};
//!
//! // 5 points from 0.0 to 1.0, both ends included
//! let grid: Vec<f64> = EvenlySpaced::new(0.0..=1.0, 5).collect();
//! assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//!
//! let two = f64::two();
//! let squared = two.powi(2);
//! ```
use std::ops::RangeInclusive;

use crate::error::Error;

/// Numeric type for samples, coefficients and statistics
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
    + std::fmt::Display
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns true if the value is neither NaN nor infinite
    fn is_real(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Rounds to the nearest integer, half away from zero
    #[must_use]
    fn round_half_away(self) -> Self {
        num_traits::float::FloatCore::round(self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
        + std::fmt::Display
{
}

/// Iterator over a fixed number of evenly spaced values in an inclusive range.
///
/// The first value is exactly `range.start()`, and when more than one point is
/// requested the last value is exactly `range.end()`.
///
/// A request for zero points yields nothing; a request for one point yields the start.
pub struct EvenlySpaced<T: Value> {
    start: T,
    end: T,
    step: T,
    points: usize,
    index: usize,
}
impl<T: Value> EvenlySpaced<T> {
    /// Creates a new iterator of `points` values spanning `range`
    pub fn new(range: RangeInclusive<T>, points: usize) -> Self {
        let (start, end) = range.into_inner();
        let step = if points > 1 {
            (end - start) / T::from_positive_int(points - 1)
        } else {
            T::zero()
        };

        Self {
            start,
            end,
            step,
            points,
            index: 0,
        }
    }

    /// Distance between consecutive values
    pub fn step(&self) -> T {
        self.step
    }
}
impl<T: Value> Iterator for EvenlySpaced<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.points {
            return None;
        }

        let value = if self.index == 0 {
            self.start
        } else if self.index + 1 == self.points {
            self.end
        } else {
            self.start + T::from_positive_int(self.index) * self.step
        };

        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.points - self.index;
        (remaining, Some(remaining))
    }
}
impl<T: Value> ExactSizeIterator for EvenlySpaced<T> {}

/// Returns the inclusive `(min, max)` of a sequence, or `None` if it is empty.
pub fn min_max<T: Value>(data: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    data.into_iter().fold(None, |acc: Option<(T, T)>, v| {
        Some(match acc {
            Some((min, max)) => (
                nalgebra::RealField::min(min, v),
                nalgebra::RealField::max(max, v),
            ),
            None => (v, v),
        })
    })
}

/// Trait for infallible integer casting with clamping.
pub trait IntClampedCast:
    num_traits::Num + num_traits::NumCast + num_traits::Bounded + Copy + PartialOrd + Ord
{
    /// Clamps a value to the range of the target type and casts it.
    fn clamped_cast<T: num_traits::PrimInt>(self) -> T {
        //
        // Simple case: self is in range of T
        if let Some(v) = num_traits::cast(self) {
            return v;
        }

        let min = match num_traits::cast::<T, Self>(T::min_value()) {
            Some(v) => v,              // Self can go lower than T - clamp to min
            None => Self::min_value(), // Self cannot go lower than T
        };

        let max = match num_traits::cast::<T, Self>(T::max_value()) {
            Some(v) => v,              // Self can go higher than T - clamp to max
            None => Self::max_value(), // Self cannot go higher than T
        };

        let clamped = self.clamp(min, max);
        num_traits::cast(clamped).unwrap_or(T::zero())
    }
}
impl<T: num_traits::PrimInt> IntClampedCast for T {}
