//! Error types for curve fitting and distribution estimation
//!
//! This module defines every failure the fitters, the distribution estimator and the
//! session can report, along with a convenient `Result` alias.
//!
//! All failures are deterministic precondition violations; retrying with the same
//! input produces the same error.

/// Errors that can occur while fitting curves or summarizing a sample.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input sequences are empty, have mismatched lengths, or contain
    /// values that are not finite numbers.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A model precondition was violated.
    ///
    /// The exponential model needs every `y > 0`, the logarithmic model needs every `x > 0`.
    #[error("Data set outside of the model's domain: {0}")]
    DomainError(String),

    /// The requested fit has more unknowns than the data can determine.
    ///
    /// Either the degree is not lower than the number of points, or repeated x-values
    /// leave too few distinct points for the number of coefficients.
    #[error("Cannot fit degree {degree} to {points} data points; the system is underdetermined")]
    UnderdeterminedFit {
        /// Polynomial degree that was requested
        degree: usize,
        /// Number of data points supplied
        points: usize,
    },

    /// The sample has zero variance, so no density curve exists.
    #[error("Sample has zero variance; cannot estimate a distribution")]
    DegenerateDistribution,

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// There is no data to operate on.
    #[error("No data available")]
    NoData,

    /// The operation needs more data points than the sample holds.
    #[error("Need at least {required} data points to fit curves, found {found}")]
    InsufficientData {
        /// Minimum number of points required
        required: usize,
        /// Number of points available
        found: usize,
    },

    /// A CSV import was rejected. Nothing was imported.
    #[error("CSV import failed on line {line}: {message}")]
    Import {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Reading an import source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for curve fitting
pub type Result<T> = std::result::Result<T, Error>;
