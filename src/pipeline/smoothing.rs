//! 1D Gaussian Smoothing
//!
//! Convolves each axis with a normalized Gaussian kernel, reflecting the
//! sequence at its ends so output length equals input length.

use crate::trace::TracePoint;

/// Default Gaussian sigma, in samples
pub const DEFAULT_SIGMA: f64 = 1.0;

/// Kernel support, in sigmas on each side
const TRUNCATE: f64 = 4.0;

/// Length-preserving Gaussian smoother.
#[derive(Debug, Clone)]
pub struct GaussianSmoother {
    pub sigma: f64,
}

impl Default for GaussianSmoother {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl GaussianSmoother {
    /// Create a smoother with a custom sigma. Non-positive sigmas are
    /// clamped up to a near-identity kernel.
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma: sigma.max(1e-6),
        }
    }

    /// Normalized Gaussian kernel of radius `TRUNCATE * sigma`, center last.
    fn kernel(&self) -> Vec<f64> {
        let radius = (TRUNCATE * self.sigma + 0.5) as usize;
        let two_sigma_sq = 2.0 * self.sigma * self.sigma;

        let mut weights: Vec<f64> = (-(radius as isize)..=radius as isize)
            .map(|offset| (-((offset * offset) as f64) / two_sigma_sq).exp())
            .collect();

        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }
        weights
    }

    /// Smooth one axis. Same length out as in.
    pub fn smooth(&self, values: &[f64]) -> Vec<f64> {
        if values.len() < 2 {
            return values.to_vec();
        }

        let weights = self.kernel();
        let radius = (weights.len() / 2) as isize;

        (0..values.len() as isize)
            .map(|center| {
                weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let idx = reflect_index(center + k as isize - radius, values.len());
                        w * values[idx]
                    })
                    .sum()
            })
            .collect()
    }

    /// Smooth the x-sequence and y-sequence independently.
    pub fn smooth_points(&self, points: &[TracePoint]) -> Vec<TracePoint> {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        self.smooth(&xs)
            .into_iter()
            .zip(self.smooth(&ys))
            .map(|(x, y)| TracePoint::new(x, y))
            .collect()
    }
}

/// Fold an out-of-range index back into `[0, n)` by reflecting about the
/// sequence ends (half-sample symmetric: ...c b a | a b c d | d c b...).
fn reflect_index(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}
