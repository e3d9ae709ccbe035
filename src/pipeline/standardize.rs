//! Per-Axis Z-Score Standardization
//!
//! Treats x and y as independent features: each axis is shifted to zero
//! mean and scaled to unit variance. An axis with zero variance carries no
//! information and maps to all zeros instead of dividing by zero.

use super::stats;
use crate::trace::TracePoint;

/// Standardize one axis to zero mean, unit variance.
pub fn standardize_axis(values: &[f64]) -> Vec<f64> {
    let mean = stats::mean(values);
    let std = stats::population_std(values);

    if std == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / std).collect()
}

/// Standardize both axes of a point sequence independently.
pub fn standardize(points: &[TracePoint]) -> Vec<TracePoint> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    standardize_axis(&xs)
        .into_iter()
        .zip(standardize_axis(&ys))
        .map(|(x, y)| TracePoint::new(x, y))
        .collect()
}
