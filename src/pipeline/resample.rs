//! Fixed-Length Linear Resampling
//!
//! Interpolates both axes onto a fixed grid of equally spaced indices
//! spanning the original index range, so every canonical shape has the same
//! number of points regardless of how fast or slow the glyph was drawn.

use crate::trace::TracePoint;

/// Default canonical shape length
pub const DEFAULT_CANONICAL_LEN: usize = 100;

/// Index-space linear interpolator to a fixed target length.
#[derive(Debug, Clone)]
pub struct LinearResampler {
    pub target_len: usize,
}

impl Default for LinearResampler {
    fn default() -> Self {
        Self {
            target_len: DEFAULT_CANONICAL_LEN,
        }
    }
}

impl LinearResampler {
    /// Create a resampler for a custom target length (minimum 2).
    pub fn new(target_len: usize) -> Self {
        Self {
            target_len: target_len.max(2),
        }
    }

    /// Resample to exactly `target_len` points.
    ///
    /// Identity when the input is already at the target length. Caller
    /// guarantees at least two input points; interpolation over fewer is
    /// undefined and rejected upstream.
    pub fn resample(&self, points: &[TracePoint]) -> Vec<TracePoint> {
        debug_assert!(points.len() >= 2);
        if points.len() == self.target_len {
            return points.to_vec();
        }

        let last = (points.len() - 1) as f64;
        let step = last / (self.target_len - 1) as f64;

        (0..self.target_len)
            .map(|i| {
                let pos = i as f64 * step;
                let lower = pos.floor() as usize;
                // The final grid position lands exactly on the last index.
                if lower >= points.len() - 1 {
                    return points[points.len() - 1];
                }
                let frac = pos - lower as f64;
                let (a, b) = (points[lower], points[lower + 1]);
                TracePoint::new(a.x + (b.x - a.x) * frac, a.y + (b.y - a.y) * frac)
            })
            .collect()
    }
}
