//! Z-Score Outlier Removal
//!
//! Drops sensor glitches before smoothing so a single spike cannot pollute
//! the Gaussian kernel's neighborhood.

use super::stats;
use crate::trace::TracePoint;

/// Default z-score magnitude above which a point counts as an outlier
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 2.0;

/// Default floor: keep the original trace if filtering would leave this
/// many points or fewer
pub const DEFAULT_MIN_POINTS: usize = 5;

/// Per-axis z-score outlier filter.
#[derive(Debug, Clone)]
pub struct OutlierFilter {
    /// |z| at or above this (on either axis) marks a point as an outlier
    pub zscore_threshold: f64,
    /// Keep the unfiltered trace when the filtered set has <= this many points
    pub min_points: usize,
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self {
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl OutlierFilter {
    pub fn new(zscore_threshold: f64, min_points: usize) -> Self {
        Self {
            zscore_threshold,
            min_points,
        }
    }

    /// Retain points whose x and y z-scores are both inside the threshold.
    ///
    /// A zero-variance axis has no defined z-score; every point passes on
    /// that axis. If the filtered set would contain `min_points` or fewer
    /// points, the original is returned unchanged.
    pub fn filter(&self, points: &[TracePoint]) -> Vec<TracePoint> {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        let (mean_x, std_x) = (stats::mean(&xs), stats::population_std(&xs));
        let (mean_y, std_y) = (stats::mean(&ys), stats::population_std(&ys));

        let inside = |value: f64, mean: f64, std: f64| {
            std == 0.0 || ((value - mean) / std).abs() < self.zscore_threshold
        };

        let filtered: Vec<TracePoint> = points
            .iter()
            .filter(|p| inside(p.x, mean_x, std_x) && inside(p.y, mean_y, std_y))
            .copied()
            .collect();

        if filtered.len() <= self.min_points {
            points.to_vec()
        } else {
            filtered
        }
    }
}
