//! Core trace types
//!
//! A [`RawTrace`] is the sensor's view of a drawing: samples in temporal
//! order, arbitrary length, arbitrary units. A [`CanonicalShape`] is the
//! pipeline's output: fixed length, denoised, standardized. Canonical shapes
//! are the only form ever compared or persisted.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single sampled position, in sensor units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
}

impl TracePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (no NaN, no infinities).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<TracePoint> for [f64; 2] {
    fn from(p: TracePoint) -> Self {
        [p.x, p.y]
    }
}

impl From<[f64; 2]> for TracePoint {
    fn from(v: [f64; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// An ordered sequence of sampled positions, as produced by the sensor.
///
/// Order is drawing order; it is meaningful for resampling, not for the
/// final comparison. May be empty (a timed-out read yields zero samples).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTrace {
    points: Vec<TracePoint>,
}

impl RawTrace {
    pub fn new(points: Vec<TracePoint>) -> Self {
        Self { points }
    }

    /// Build a trace from raw coordinate pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            points: pairs
                .into_iter()
                .map(|(x, y)| TracePoint::new(x, y))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    /// Reject traces the pipeline cannot interpolate: fewer than two points,
    /// or any non-finite coordinate.
    pub fn validate(&self) -> crate::Result<()> {
        if self.points.len() < 2 {
            return Err(crate::Error::TraceTooShort(self.points.len()));
        }
        if let Some(idx) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(crate::Error::NonFiniteCoordinate(idx));
        }
        Ok(())
    }

    /// Load a trace from a JSON file of `[x, y]` pairs.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: RawTrace = serde_json::from_str(&content)?;
        Ok(trace)
    }

    /// Save a trace as a JSON file of `[x, y]` pairs.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl FromIterator<TracePoint> for RawTrace {
    fn from_iter<T: IntoIterator<Item = TracePoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// A fixed-length, denoised, per-axis standardized point sequence.
///
/// Produced only by the preprocessing pipeline (or deserialized from a
/// library that stored pipeline output). Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalShape {
    points: Vec<TracePoint>,
}

impl CanonicalShape {
    /// Wrap an already-canonicalized point sequence.
    ///
    /// Rejects sequences too short to compare; the fixed-length invariant
    /// itself is owned by the resampling stage that produces these.
    pub fn new(points: Vec<TracePoint>) -> crate::Result<Self> {
        if points.len() < 2 {
            return Err(crate::Error::Shape(format!(
                "canonical shape needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
            return Err(crate::Error::Shape(format!(
                "canonical shape has a non-finite coordinate at index {idx}"
            )));
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    /// The x-sequence as a dense array.
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// The y-sequence as a dense array.
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}
