//! # Curvefit
//! ## Fit a curve, see how wrong it is
//!
//! Enter some (x, y) points, pick a model, and get back an equation you can read along
//! with how far the curve strays from your data: the largest, smallest and mean absolute
//! error of the fit.
//!
//! The models are deliberately few and simple:
//! - Polynomials of any degree, `y = c₀xᵈ + … + c_d`
//! - Exponential growth or decay, `y = a·e^(b·x)`
//! - Natural logarithms, `y = a + b·ln(x)`
//! - A normal-distribution summary of one axis, with a density curve and a histogram
//!
//! Every curve is found by ordinary least squares, solved with a singular value
//! decomposition. The exponential and logarithmic models are linearized first.
//!
//! ```rust
//! use curvefit::{fit_polynomial, CurveModel};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = [1.0, 3.1, 4.9, 7.0];
//!
//! let fit = fit_polynomial(&xs, &ys, 1).unwrap();
//! println!("{}", fit.equation());
//!
//! let stats = fit.error_stats();
//! assert!(stats.max_abs_error < 0.2);
//! ```
//!
//! # Core Concepts
//! - A [`Polynomial`] is a function returning a value `y` for any input `x`.
//! - A fit ([`PolynomialFit`], [`ExponentialFit`], [`LogarithmicFit`]) is a model estimated
//!   from a sample. All of them implement [`CurveModel`].
//!     - [`CurveModel::error_band`] samples the curve with a band of one mean absolute
//!       error on either side, ready to be drawn.
//! - A [`Sample`] holds the data points; a [`Session`] wraps one with a selected
//!   [`FitMode`] and validates raw text input before it reaches the sample.
//! - [`distribution::summarize_distribution`] summarizes one axis as a normal distribution.
//!
//! # Logging
//! Fits and imports emit [`tracing`] events. The library installs no subscriber.
//!
//! # Testing utilities
//! Float-tolerant assertion macros live in [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]


pub mod display;
pub mod distribution;
pub mod error;
pub mod sample;
pub mod session;
pub mod statistics;
pub mod validate;
pub mod value;

mod fit;
mod polynomial;

pub use fit::*;
pub use polynomial::Polynomial;

pub use distribution::{summarize_distribution, DistributionSummary};
pub use error::{Error, Result};
pub use sample::{Axis, Sample};
pub use session::{FitMode, FitOutcome, Session};

pub use nalgebra;
