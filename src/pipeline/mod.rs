//! Shape preprocessing pipeline
//!
//! Turns a raw coordinate trace into a canonical shape through a fixed
//! sequence of pure transforms:
//! - z-score outlier removal (spikes would pollute the smoothing kernel)
//! - Gaussian smoothing (noise would inflate the variance estimates)
//! - per-axis standardization
//! - linear resampling to a fixed length (downstream consumers always see
//!   the same vector size)

pub mod outlier_filter;
pub mod resample;
pub mod smoothing;
pub mod standardize;
pub mod stats;

pub use outlier_filter::OutlierFilter;
pub use resample::{LinearResampler, DEFAULT_CANONICAL_LEN};
pub use smoothing::GaussianSmoother;

use crate::trace::{CanonicalShape, RawTrace};
use tracing::debug;

/// Configurable preprocessing pipeline.
///
/// Deterministic for fixed parameters. Stage order is significant and fixed.
#[derive(Debug, Clone, Default)]
pub struct ShapePreprocessor {
    pub outlier_filter: OutlierFilter,
    pub smoother: GaussianSmoother,
    pub resampler: LinearResampler,
}

impl ShapePreprocessor {
    pub fn new(
        outlier_filter: OutlierFilter,
        smoother: GaussianSmoother,
        resampler: LinearResampler,
    ) -> Self {
        Self {
            outlier_filter,
            smoother,
            resampler,
        }
    }

    /// The fixed length every canonical shape comes out at.
    pub fn canonical_len(&self) -> usize {
        self.resampler.target_len
    }

    /// Canonicalize a raw trace.
    ///
    /// Rejects traces with fewer than two points or non-finite coordinates;
    /// both are retryable input errors, reported before any stage runs.
    pub fn preprocess(&self, raw: &RawTrace) -> crate::Result<CanonicalShape> {
        raw.validate()?;

        let filtered = self.outlier_filter.filter(raw.points());
        let smoothed = self.smoother.smooth_points(&filtered);
        let standardized = standardize::standardize(&smoothed);
        let resampled = self.resampler.resample(&standardized);

        debug!(
            input_len = raw.len(),
            filtered_len = filtered.len(),
            output_len = resampled.len(),
            "Canonicalized trace"
        );

        CanonicalShape::new(resampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RawTrace;

    fn diagonal_trace(len: usize) -> RawTrace {
        RawTrace::from_pairs((0..len).map(|i| (i as f64, 2.0 * i as f64)))
    }

    #[test]
    fn test_preprocess_produces_fixed_length() {
        let pre = ShapePreprocessor::default();
        for len in [2, 7, 50, 100, 313] {
            let shape = pre.preprocess(&diagonal_trace(len)).unwrap();
            assert_eq!(shape.len(), DEFAULT_CANONICAL_LEN, "input len {len}");
        }
    }

    #[test]
    fn test_preprocess_rejects_degenerate_input() {
        let pre = ShapePreprocessor::default();
        assert!(matches!(
            pre.preprocess(&RawTrace::default()),
            Err(crate::Error::TraceTooShort(0))
        ));
        assert!(matches!(
            pre.preprocess(&RawTrace::from_pairs([(3.0, 4.0)])),
            Err(crate::Error::TraceTooShort(1))
        ));
        assert!(matches!(
            pre.preprocess(&RawTrace::from_pairs([(0.0, 0.0), (f64::INFINITY, 1.0)])),
            Err(crate::Error::NonFiniteCoordinate(1))
        ));
    }

    #[test]
    fn test_preprocess_standardizes_axes() {
        let pre = ShapePreprocessor::default();
        let shape = pre.preprocess(&diagonal_trace(100)).unwrap();

        // Input length equals the target, so resampling is the identity and
        // the standardization stage's statistics survive untouched.
        for axis in [shape.xs(), shape.ys()] {
            let mean = stats::mean(&axis);
            let std = stats::population_std(&axis);
            assert!(mean.abs() < 1e-9, "mean {mean}");
            assert!((std - 1.0).abs() < 1e-9, "std {std}");
        }
    }

    #[test]
    fn test_preprocess_handles_constant_axis() {
        // A perfectly horizontal stroke: y has zero variance everywhere.
        let pre = ShapePreprocessor::default();
        let raw = RawTrace::from_pairs((0..40).map(|i| (i as f64, 3.0)));
        let shape = pre.preprocess(&raw).unwrap();

        assert_eq!(shape.len(), DEFAULT_CANONICAL_LEN);
        assert!(shape.ys().iter().all(|y| *y == 0.0));
    }
}
