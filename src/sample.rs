//! The (x, y) data points a fit is computed from
//!
//! A [`Sample`] keeps two equal-length columns of finite values. Every mutation either
//! succeeds completely or leaves the sample as it was.
//!
//! Points can be added one at a time, in bulk, or from CSV text with [`Sample::read_csv`]:
//! ```rust
//! use curvefit::Sample;
//!
//! let csv = "x,y\n1,2\n2,4.5\n\n3,6\n";
//! let sample: Sample = Sample::read_csv(csv.as_bytes()).unwrap();
//! assert_eq!(sample.xs(), &[1.0, 2.0, 3.0]);
//! assert_eq!(sample.ys(), &[2.0, 4.5, 6.0]);
//! ```
use std::{io::BufRead, ops::RangeInclusive};

use crate::{
    error::{Error, Result},
    validate,
    value::{min_max, Value},
};

/// Margin added on both sides of the x-range when drawing fitted curves
pub const DEFAULT_PLOT_BUFFER: f64 = 2.0;

/// Selects one column of a [`Sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// The inputs
    #[default]
    X,

    /// The observed values
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Ordered (x, y) data points.
///
/// Invariant: both columns have the same length and hold only finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T: Value = f64> {
    xs: Vec<T>,
    ys: Vec<T>,
}
impl<T: Value> Default for Sample<T> {
    fn default() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }
}
impl<T: Value> Sample<T> {
    /// Creates a sample from two columns.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the columns differ in length or contain a
    /// non-finite value.
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::InvalidInput(format!(
                "{} x-values but {} y-values",
                xs.len(),
                ys.len()
            )));
        }

        for (&x, &y) in xs.iter().zip(&ys) {
            check_point(x, y)?;
        }

        Ok(Self { xs, ys })
    }

    /// Appends a single point.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if either value is not finite.
    pub fn push(&mut self, x: T, y: T) -> Result<()> {
        check_point(x, y)?;
        self.xs.push(x);
        self.ys.push(y);
        Ok(())
    }

    /// Removes and returns the most recently added point.
    pub fn pop(&mut self) -> Option<(T, T)> {
        let x = self.xs.pop()?;
        let y = self.ys.pop()?;
        Some((x, y))
    }

    /// Appends many points at once.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if any value is not finite, in which case
    /// nothing is appended.
    pub fn extend(&mut self, points: impl IntoIterator<Item = (T, T)>) -> Result<()> {
        let points: Vec<_> = points.into_iter().collect();
        for &(x, y) in &points {
            check_point(x, y)?;
        }

        self.xs.reserve(points.len());
        self.ys.reserve(points.len());
        for (x, y) in points {
            self.xs.push(x);
            self.ys.push(y);
        }

        Ok(())
    }

    /// Removes every point.
    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the sample holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// The x column.
    #[must_use]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// The y column.
    #[must_use]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// The column selected by `axis`.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &[T] {
        match axis {
            Axis::X => &self.xs,
            Axis::Y => &self.ys,
        }
    }

    /// Iterates over the points in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// The x-range of the sample widened by `buffer` on both sides.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// # Example
    /// ```
    /// # use curvefit::Sample;
    /// let sample = Sample::new(vec![1.0, 4.0, 3.0], vec![0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(sample.plot_range(2.0), Some(-1.0..=6.0));
    /// ```
    #[must_use]
    pub fn plot_range(&self, buffer: T) -> Option<RangeInclusive<T>> {
        let (min, max) = min_max(self.xs.iter().copied())?;
        Some(min - buffer..=max + buffer)
    }

    /// Reads a sample from CSV text.
    ///
    /// The first line is a header and must name at least two columns. The first two
    /// columns of every following line are x and y; further columns are ignored, as are
    /// blank lines.
    ///
    /// # Errors
    /// - [`Error::Import`] if the header has fewer than two columns, or a row is missing
    ///   a column or holds a value that is not a finite number. Nothing is imported.
    /// - [`Error::Io`] if reading fails.
    pub fn read_csv(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader.lines();

        let header = lines.next().transpose()?.unwrap_or_default();
        let columns = header.split(',').filter(|c| !c.trim().is_empty()).count();
        if columns < 2 {
            return Err(import_error(
                1,
                "the CSV file must have at least two columns for x and y values".to_string(),
            ));
        }

        let mut sample = Self::default();
        for (i, line) in lines.enumerate() {
            let line = line?;
            let line_number = i + 2;
            if line.trim().is_empty() {
                continue;
            }

            let mut cells = line.split(',');
            let x = parse_cell(cells.next(), line_number, Axis::X)?;
            let y = parse_cell(cells.next(), line_number, Axis::Y)?;
            sample.xs.push(x);
            sample.ys.push(y);
        }

        tracing::debug!(points = sample.len(), "imported CSV sample");
        Ok(sample)
    }
}

fn check_point<T: Value>(x: T, y: T) -> Result<()> {
    if x.is_real() && y.is_real() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "the point ({x}, {y}) is not finite"
        )))
    }
}

fn parse_cell<T: Value>(cell: Option<&str>, line: usize, axis: Axis) -> Result<T> {
    let Some(cell) = cell else {
        return Err(import_error(line, format!("missing the {axis} column")));
    };

    validate::parse_value(cell).map_err(|e| match e {
        Error::InvalidInput(reason) => import_error(line, format!("{axis} column: {reason}")),
        other => other,
    })
}

fn import_error(line: usize, message: String) -> Error {
    tracing::warn!(line, %message, "rejected CSV import");
    Error::Import { line, message }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_fit_error;

    fn sample() -> Sample {
        Sample::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]).unwrap()
    }

    #[test]
    fn new_rejects_bad_columns() {
        assert_fit_error!(Sample::new(vec![1.0], vec![]), InvalidInput(_));
        assert_fit_error!(Sample::new(vec![1.0], vec![f64::NAN]), InvalidInput(_));
        assert!(Sample::<f64>::new(vec![], vec![]).unwrap().is_empty());
    }

    #[test]
    fn push_and_pop() {
        let mut s = sample();
        s.push(4.0, 40.0).unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.pop(), Some((4.0, 40.0)));
        assert_eq!(s.pop(), Some((3.0, 30.0)));
        assert_eq!(s.len(), 2);

        assert_fit_error!(s.push(f64::INFINITY, 1.0), InvalidInput(_));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn pop_empty() {
        let mut s = Sample::<f64>::default();
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn extend_is_all_or_nothing() {
        let mut s = sample();
        assert_fit_error!(s.extend(vec![(4.0, 40.0), (5.0, f64::NAN)]), InvalidInput(_));
        assert_eq!(s, sample());

        s.extend(vec![(4.0, 40.0), (5.0, 50.0)]).unwrap();
        assert_eq!(s.xs(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.ys(), &[10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn axis_and_points() {
        let s = sample();
        assert_eq!(s.axis(Axis::X), s.xs());
        assert_eq!(s.axis(Axis::Y), s.ys());
        let points: Vec<_> = s.points().collect();
        assert_eq!(points, vec![(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)]);
    }

    #[test]
    fn plot_range_adds_buffer() {
        let s = sample();
        assert_eq!(s.plot_range(DEFAULT_PLOT_BUFFER), Some(-1.0..=5.0));
        assert_eq!(Sample::<f64>::default().plot_range(2.0), None);
    }

    #[test]
    fn clear_empties() {
        let mut s = sample();
        s.clear();
        assert!(s.is_empty());
        assert!(s.xs().is_empty() && s.ys().is_empty());
    }

    #[test]
    fn csv_reads_first_two_columns() {
        let csv = "time, value, note\n0, 1.5, a\n 1 ,-2e1, b\n";
        let s: Sample = Sample::read_csv(csv.as_bytes()).unwrap();
        assert_eq!(s.xs(), &[0.0, 1.0]);
        assert_eq!(s.ys(), &[1.5, -20.0]);
    }

    #[test]
    fn csv_header_only_is_empty() {
        let s: Sample = Sample::read_csv("x,y\n".as_bytes()).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn csv_rejects_single_column() {
        let result: Result<Sample> = Sample::read_csv("x\n1\n2\n".as_bytes());
        assert_fit_error!(result, Import { line: 1, .. });

        let result: Result<Sample> = Sample::read_csv("".as_bytes());
        assert_fit_error!(result, Import { line: 1, .. });
    }

    #[test]
    fn csv_rejects_non_numeric_values() {
        let result: Result<Sample> = Sample::read_csv("x,y\n1,2\n3,abc\n".as_bytes());
        assert_fit_error!(result, Import { line: 3, .. });

        let result: Result<Sample> = Sample::read_csv("x,y\n1,2\nnan,4\n".as_bytes());
        assert_fit_error!(result, Import { line: 3, .. });
    }

    #[test]
    fn csv_rejects_missing_column() {
        let result: Result<Sample> = Sample::read_csv("x,y\n1,2\n\n3\n".as_bytes());
        assert_fit_error!(result, Import { line: 4, .. });
    }
}
