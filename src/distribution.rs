//! Normal-distribution summary of one axis of a sample
//!
//! [`summarize_distribution`] reports the mean and population standard deviation of a
//! set of values, the Gaussian density with those parameters on an evenly spaced grid,
//! and an equal-width histogram of the values.
//!
//! The density is unscaled; [`DistributionSummary::scaled_density`] converts it to the
//! units of the histogram counts, and [`DistributionSummary::density_histogram`]
//! converts the counts to the units of the density, so either pair can be overlaid.
//!
//! # Example
//! ```rust
//! use curvefit::distribution::summarize_distribution;
//!
//! let summary = summarize_distribution(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(summary.mean, 3.0);
//! assert_eq!(summary.histogram.counts.iter().sum::<usize>(), 5);
//! assert_eq!(summary.grid.len(), 1000);
//! ```
use crate::{
    error::{Error, Result},
    statistics,
    value::{min_max, EvenlySpaced, Value},
};

/// Number of grid points the density is evaluated on by default
pub const DEFAULT_GRID_POINTS: usize = 1000;

/// Number of histogram bins by default
pub const DEFAULT_BINS: usize = 30;

/// Options for [`summarize_distribution_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionOptions {
    /// Number of evenly spaced points the density is evaluated on
    pub grid_points: usize,

    /// Number of equal-width histogram bins
    pub bins: usize,
}
impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            bins: DEFAULT_BINS,
        }
    }
}

/// Equal-width histogram over `[min, max]`.
///
/// Bin `i` covers `[edges[i], edges[i + 1])`, except the last bin which also
/// includes `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<T: Value = f64> {
    /// Bin boundaries, one more than the number of bins
    pub edges: Vec<T>,

    /// Number of values in each bin
    pub counts: Vec<usize>,

    /// Width shared by every bin
    pub bin_width: T,
}

/// Summary of a sample under a normal-distribution model.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary<T: Value = f64> {
    /// Arithmetic mean
    pub mean: T,

    /// Population standard deviation (divisor `N`)
    pub std_dev: T,

    /// Number of values summarized
    pub sample_size: usize,

    /// Evenly spaced points from the smallest to the largest value, both included
    pub grid: Vec<T>,

    /// Gaussian density at each grid point
    pub density: Vec<T>,

    /// Histogram of the values
    pub histogram: Histogram<T>,
}
impl<T: Value> DistributionSummary<T> {
    /// Density scaled to histogram counts: `density × sample_size × bin_width`.
    ///
    /// # Example
    /// ```
    /// # use curvefit::distribution::summarize_distribution;
    /// let summary = summarize_distribution(&[1.0, 2.0, 2.0, 3.0]).unwrap();
    /// let scaled = summary.scaled_density();
    /// assert_eq!(scaled.len(), summary.density.len());
    /// ```
    #[must_use]
    pub fn scaled_density(&self) -> Vec<T> {
        let scale = T::from_positive_int(self.sample_size) * self.histogram.bin_width;
        self.density.iter().map(|&d| d * scale).collect()
    }

    /// Histogram heights normalized to a density: `count / (sample_size × bin_width)`.
    ///
    /// The bars then enclose a total area of 1.
    #[must_use]
    pub fn density_histogram(&self) -> Vec<T> {
        let scale = T::from_positive_int(self.sample_size) * self.histogram.bin_width;
        self.histogram
            .counts
            .iter()
            .map(|&c| T::from_positive_int(c) / scale)
            .collect()
    }
}

/// Gaussian probability density at `x`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// f(x) = 1 / (σ·√(2π)) · e^(-½·((x - μ) / σ)²)
/// ```
/// </div>
///
/// # Example
/// ```
/// # use curvefit::distribution::gaussian_density;
/// let peak = gaussian_density(0.0f64, 0.0, 1.0);
/// assert!((peak - 0.398_942_280_401_432_7).abs() < 1e-12);
/// ```
pub fn gaussian_density<T: Value>(x: T, mean: T, std_dev: T) -> T {
    let z = (x - mean) / std_dev;
    let norm = T::one() / (std_dev * (T::two() * T::pi()).sqrt());
    norm * (-(z * z) / T::two()).exp()
}

/// Summarizes a sample with the default grid size and bin count.
///
/// See [`summarize_distribution_with`].
///
/// # Errors
/// - [`Error::InvalidInput`] if the sample is empty, contains non-finite values, or has
///   a range too wide to represent.
/// - [`Error::DegenerateDistribution`] if every value is the same.
pub fn summarize_distribution<T: Value>(sample: &[T]) -> Result<DistributionSummary<T>> {
    summarize_distribution_with(sample, &DistributionOptions::default())
}

/// Summarizes a sample under a normal-distribution model.
///
/// # Errors
/// - [`Error::InvalidInput`] if the sample is empty or contains non-finite values, if its
///   range is too wide to represent, or if `options` asks for zero grid points or zero bins.
/// - [`Error::DegenerateDistribution`] if the standard deviation is zero.
///
/// # Example
/// ```
/// # use curvefit::distribution::{summarize_distribution_with, DistributionOptions};
/// let options = DistributionOptions { grid_points: 5, bins: 2 };
/// let summary = summarize_distribution_with(&[0.0, 1.0, 1.0, 4.0], &options).unwrap();
/// assert_eq!(summary.grid, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(summary.histogram.counts, vec![3, 1]);
/// ```
pub fn summarize_distribution_with<T: Value>(
    sample: &[T],
    options: &DistributionOptions,
) -> Result<DistributionSummary<T>> {
    if options.grid_points == 0 {
        return Err(Error::InvalidInput(
            "the density grid needs at least one point".to_string(),
        ));
    } else if options.bins == 0 {
        return Err(Error::InvalidInput(
            "the histogram needs at least one bin".to_string(),
        ));
    }

    if let Some(bad) = sample.iter().find(|v| !v.is_real()) {
        return Err(Error::InvalidInput(format!(
            "the sample contains a non-finite value ({bad})"
        )));
    }
    let Some((min, max)) = min_max(sample.iter().copied()) else {
        return Err(Error::InvalidInput("the sample is empty".to_string()));
    };

    // A constant sample can leave a rounding-sized deviation, so check the spread too
    let (std_dev, mean) = statistics::stddev_and_mean(sample.iter().copied());
    if std_dev <= T::zero() || min >= max {
        return Err(Error::DegenerateDistribution);
    }

    let spread = max - min;
    if !spread.is_real() || !std_dev.is_real() || !mean.is_real() {
        return Err(Error::InvalidInput(format!(
            "the sample spans {min} to {max}, which is too wide to summarize"
        )));
    }

    let grid: Vec<T> = EvenlySpaced::new(min..=max, options.grid_points).collect();
    let density = grid
        .iter()
        .map(|&x| gaussian_density(x, mean, std_dev))
        .collect();
    let histogram = histogram(sample, min, max, options.bins);

    tracing::debug!(
        %mean,
        %std_dev,
        sample_size = sample.len(),
        bins = options.bins,
        "summarized distribution"
    );

    Ok(DistributionSummary {
        mean,
        std_dev,
        sample_size: sample.len(),
        grid,
        density,
        histogram,
    })
}

/// Bins the sample into `bins` equal-width bins over `[min, max]`, with `min < max`.
fn histogram<T: Value>(sample: &[T], min: T, max: T, bins: usize) -> Histogram<T> {
    let edges_iter = EvenlySpaced::new(min..=max, bins + 1);
    let bin_width = edges_iter.step();
    let edges: Vec<T> = edges_iter.collect();

    let mut counts = vec![0usize; bins];
    let last = bins - 1;
    for &value in sample {
        let index = if value >= max {
            last
        } else {
            // Truncation towards zero is the floor here since value >= min
            num_traits::cast::<T, usize>((value - min) / bin_width)
                .map_or(last, |i| i.min(last))
        };
        counts[index] += 1;
    }

    Histogram {
        edges,
        counts,
        bin_width,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, assert_fit_error, test::add_noise};

    #[test]
    fn mean_and_population_std() {
        let summary = summarize_distribution(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_close!(summary.mean, 3.0);
        assert_close!(summary.std_dev, 2f64.sqrt());
        assert_eq!(summary.sample_size, 5);
    }

    #[test]
    fn grid_spans_min_to_max() {
        let summary = summarize_distribution(&[4.0, -1.0, 2.5, 0.0]).unwrap();
        assert_eq!(summary.grid.len(), DEFAULT_GRID_POINTS);
        assert_eq!(summary.density.len(), DEFAULT_GRID_POINTS);
        assert_eq!(summary.grid[0], -1.0);
        assert_eq!(summary.grid[DEFAULT_GRID_POINTS - 1], 4.0);
    }

    #[test]
    fn histogram_shape() {
        let sample = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
        let summary = summarize_distribution(&sample).unwrap();
        let hist = &summary.histogram;

        assert_eq!(hist.edges.len(), DEFAULT_BINS + 1);
        assert_eq!(hist.counts.len(), DEFAULT_BINS);
        assert_eq!(hist.edges[0], 0.0);
        assert_eq!(hist.edges[DEFAULT_BINS], 3.0);
        assert_close!(hist.bin_width, 0.1);
        assert_eq!(hist.counts.iter().sum::<usize>(), sample.len());

        // The maximum lands in the last bin
        assert_eq!(hist.counts[DEFAULT_BINS - 1], 1);
        assert_eq!(hist.counts[0], 1);
    }

    #[test]
    fn histogram_right_edge_is_open_except_last() {
        let options = DistributionOptions {
            grid_points: 3,
            bins: 4,
        };
        let summary = summarize_distribution_with(&[0.0, 1.0, 2.0, 3.0, 4.0], &options).unwrap();
        assert_eq!(summary.histogram.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(summary.histogram.counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn density_matches_formula() {
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = summarize_distribution(&sample).unwrap();
        let sigma = 2f64.sqrt();
        for (&x, &d) in summary.grid.iter().zip(&summary.density) {
            let expected = (-0.5 * ((x - 3.0) / sigma).powi(2)).exp()
                / (sigma * (2.0 * std::f64::consts::PI).sqrt());
            assert_close!(d, expected);
        }
    }

    #[test]
    fn scaled_density_and_density_histogram() {
        let sample = [1.0, 2.0, 2.0, 3.0, 7.0];
        let summary = summarize_distribution(&sample).unwrap();
        let scale = 5.0 * summary.histogram.bin_width;

        let expected: Vec<f64> = summary.density.iter().map(|d| d * scale).collect();
        assert_all_close!(summary.scaled_density(), expected);

        // Bars of a density histogram enclose unit area
        let area: f64 = summary
            .density_histogram()
            .iter()
            .map(|h| h * summary.histogram.bin_width)
            .sum();
        assert_close!(area, 1.0);
    }

    #[test]
    fn noisy_normal_sample() {
        let sample = add_noise(&[10.0; 5000], 2.0, 3);
        let summary = summarize_distribution(&sample).unwrap();
        assert_close!(summary.mean, 10.0, tol = 0.01);
        assert_close!(summary.std_dev, 2.0, tol = 0.05);
        assert_eq!(summary.histogram.counts.iter().sum::<usize>(), 5000);
    }

    #[test]
    fn degenerate_and_invalid_samples() {
        assert_fit_error!(summarize_distribution(&[2.0, 2.0, 2.0]), DegenerateDistribution);
        assert_fit_error!(summarize_distribution(&[7.0]), DegenerateDistribution);
        assert_fit_error!(summarize_distribution(&[0.1; 7]), DegenerateDistribution);
        assert_fit_error!(summarize_distribution::<f64>(&[]), InvalidInput(_));
        assert_fit_error!(summarize_distribution(&[1.0, f64::NAN]), InvalidInput(_));
    }

    #[test]
    fn huge_values_stay_finite() {
        let summary = summarize_distribution(&[1e300f64, 3e300, 2e300]).unwrap();
        assert_close!(summary.mean / 1e300, 2.0);
        assert_close!(summary.std_dev / 1e300, (2.0f64 / 3.0).sqrt());
        assert_eq!(summary.grid[0], 1e300);
        assert_eq!(summary.grid[DEFAULT_GRID_POINTS - 1], 3e300);
        assert!(summary.grid.iter().all(|x| x.is_finite()));
        assert!(summary.density.iter().all(|d| d.is_finite()));
        assert!(summary.histogram.bin_width.is_finite());
        assert_eq!(summary.histogram.counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn range_too_wide_is_rejected() {
        assert_fit_error!(
            summarize_distribution(&[1e308, -1e308, 0.0]),
            InvalidInput(_)
        );
    }

    #[test]
    fn zero_grid_or_bins_rejected() {
        let sample = [1.0, 2.0];
        let no_grid = DistributionOptions {
            grid_points: 0,
            ..Default::default()
        };
        let no_bins = DistributionOptions {
            bins: 0,
            ..Default::default()
        };
        assert_fit_error!(summarize_distribution_with(&sample, &no_grid), InvalidInput(_));
        assert_fit_error!(summarize_distribution_with(&sample, &no_bins), InvalidInput(_));
    }

    #[test]
    fn gaussian_density_is_symmetric() {
        assert_close!(
            gaussian_density(1.0, 0.0, 2.0),
            gaussian_density(-1.0, 0.0, 2.0)
        );
        assert!(gaussian_density(0.0, 0.0, 2.0) > gaussian_density(1.0, 0.0, 2.0));
    }
}
