//! Covariance Similarity Score
//!
//! After Procrustes alignment, each axis of the two shapes is compared with
//! a normalized covariance (Pearson-style) coefficient; the final score is
//! the mean of the x and y coefficients. A perfect match scores close to 1,
//! unrelated shapes close to 0, anti-correlated shapes negative.

use super::procrustes;
use crate::pipeline::stats;
use crate::trace::{CanonicalShape, TracePoint};
use tracing::warn;

/// A similarity score together with the aligned point sets it was computed
/// from.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// Mean of the per-axis normalized covariance coefficients
    pub similarity: f64,
    /// Reference after alignment (centered, unit norm)
    pub aligned_reference: Vec<TracePoint>,
    /// Candidate after alignment onto the reference
    pub aligned_candidate: Vec<TracePoint>,
}

impl ScoreOutcome {
    fn incomparable(reference: &CanonicalShape, candidate: &CanonicalShape) -> Self {
        Self {
            similarity: 0.0,
            aligned_reference: reference.points().to_vec(),
            aligned_candidate: candidate.points().to_vec(),
        }
    }
}

/// Score the similarity of two canonical shapes.
///
/// Pure function; no side effects beyond diagnostics. Shapes of unequal
/// length are declared incomparable and score exactly 0: resampling makes
/// lengths always equal, so a mismatch here means an upstream invariant was
/// violated, and it is logged as such. Degenerate shapes (zero variance on
/// any axis, or collapsed to a point) also score 0 rather than dividing by
/// zero.
pub fn score(reference: &CanonicalShape, candidate: &CanonicalShape) -> ScoreOutcome {
    if reference.len() != candidate.len() {
        warn!(
            reference_len = reference.len(),
            candidate_len = candidate.len(),
            "Shape lengths differ; skipping alignment (upstream resampling invariant broken?)"
        );
        return ScoreOutcome::incomparable(reference, candidate);
    }

    let fit = match procrustes::superimpose(reference.points(), candidate.points()) {
        Some(fit) => fit,
        None => return ScoreOutcome::incomparable(reference, candidate),
    };

    let ax: Vec<f64> = fit.reference.iter().map(|p| p.x).collect();
    let ay: Vec<f64> = fit.reference.iter().map(|p| p.y).collect();
    let bx: Vec<f64> = fit.candidate.iter().map(|p| p.x).collect();
    let by: Vec<f64> = fit.candidate.iter().map(|p| p.y).collect();

    let similarity = match (axis_coefficient(&ax, &bx), axis_coefficient(&ay, &by)) {
        (Some(cx), Some(cy)) => (cx + cy) / 2.0,
        _ => 0.0,
    };

    ScoreOutcome {
        similarity,
        aligned_reference: fit.reference,
        aligned_candidate: fit.candidate,
    }
}

/// Covariance between two axis sequences, normalized by the product of
/// their standard deviations. `None` when either deviation is zero.
fn axis_coefficient(a: &[f64], b: &[f64]) -> Option<f64> {
    let std_a = stats::population_std(a);
    let std_b = stats::population_std(b);
    if std_a == 0.0 || std_b == 0.0 {
        return None;
    }
    Some(stats::sample_covariance(a, b) / (std_a * std_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(pairs: impl IntoIterator<Item = (f64, f64)>) -> CanonicalShape {
        CanonicalShape::new(
            pairs
                .into_iter()
                .map(|(x, y)| TracePoint::new(x, y))
                .collect(),
        )
        .unwrap()
    }

    fn circle(n: usize) -> CanonicalShape {
        canonical((0..n).map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            (t.cos(), t.sin())
        }))
    }

    #[test]
    fn test_identical_shapes_score_near_one() {
        let shape = circle(100);
        let outcome = score(&shape, &shape);
        // Sample covariance over population deviations overshoots 1 by
        // n/(n-1) on a perfect match.
        assert!(outcome.similarity > 0.99, "{}", outcome.similarity);
        assert!(outcome.similarity < 1.02);
    }

    #[test]
    fn test_rotated_scaled_copy_scores_near_one() {
        let shape = circle(100);
        let (s, c) = 1.1f64.sin_cos();
        let moved = canonical(shape.points().iter().map(|p| {
            (
                5.0 * (c * p.x - s * p.y) + 40.0,
                5.0 * (s * p.x + c * p.y) - 7.0,
            )
        }));
        let outcome = score(&shape, &moved);
        assert!(outcome.similarity > 0.95, "{}", outcome.similarity);
    }

    #[test]
    fn test_length_mismatch_scores_exactly_zero() {
        let a = circle(100);
        let b = circle(60);
        let outcome = score(&a, &b);
        assert_eq!(outcome.similarity, 0.0);
        // Inputs are passed through untouched.
        assert_eq!(outcome.aligned_reference, a.points());
        assert_eq!(outcome.aligned_candidate, b.points());
    }

    #[test]
    fn test_degenerate_shape_scores_zero() {
        let a = circle(10);
        let b = canonical(std::iter::repeat((3.0, 3.0)).take(10));
        assert_eq!(score(&a, &b).similarity, 0.0);
        assert_eq!(score(&b, &a).similarity, 0.0);
    }

    #[test]
    fn test_zero_variance_axis_scores_zero() {
        // Two horizontal strokes align onto each other without leaving the
        // x axis, so the y coefficient is undefined and the guard yields 0
        // even though the x sequences correlate perfectly.
        let a = canonical((0..20).map(|i| (i as f64, 5.0)));
        let b = canonical((0..20).map(|i| (2.0 * i as f64, -1.0)));
        assert_eq!(score(&a, &b).similarity, 0.0);
    }

    #[test]
    fn test_score_is_symmetric_for_clean_shapes() {
        let a = circle(50);
        let b = canonical((0..50).map(|i| {
            let t = i as f64 / 50.0 * std::f64::consts::TAU;
            (t.cos(), (2.0 * t).sin())
        }));
        let ab = score(&a, &b).similarity;
        let ba = score(&b, &a).similarity;
        assert!((ab - ba).abs() < 1e-6, "ab {ab} ba {ba}");
    }
}
