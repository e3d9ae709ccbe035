//! Procrustes Superimposition
//!
//! Best-fit rigid alignment of one point sequence onto another: both sets
//! are centered and scaled to unit Frobenius norm, then the candidate is
//! rotated (reflections permitted) and uniformly scaled to minimize the sum
//! of squared distances to the reference. Removes residual pose differences
//! that per-axis standardization alone cannot correct, such as rotated
//! drawings.

use crate::trace::TracePoint;

/// Outcome of superimposing a candidate onto a reference.
#[derive(Debug, Clone)]
pub struct Superimposition {
    /// Reference, centered and scaled to unit norm
    pub reference: Vec<TracePoint>,
    /// Candidate, centered, unit-scaled, then rotated and scaled onto the
    /// reference
    pub candidate: Vec<TracePoint>,
    /// Sum of squared distances between corresponding points after the fit
    pub disparity: f64,
}

/// Superimpose `candidate` onto `reference`.
///
/// Both sequences must have the same nonzero length (the scorer checks this
/// before calling). Returns `None` when either set collapses to a single
/// location (zero norm after centering), in which case no alignment is
/// defined.
pub fn superimpose(
    reference: &[TracePoint],
    candidate: &[TracePoint],
) -> Option<Superimposition> {
    debug_assert_eq!(reference.len(), candidate.len());

    let a = normalized(reference)?;
    let b = normalized(candidate)?;

    // Cross-covariance matrix M = A^T B (2x2).
    let mut m = [[0.0f64; 2]; 2];
    for (pa, pb) in a.iter().zip(&b) {
        m[0][0] += pa.x * pb.x;
        m[0][1] += pa.x * pb.y;
        m[1][0] += pa.y * pb.x;
        m[1][1] += pa.y * pb.y;
    }

    let (rotation, scale) = orthogonal_fit(m);

    let candidate: Vec<TracePoint> = b
        .iter()
        .map(|p| {
            TracePoint::new(
                scale * (rotation[0][0] * p.x + rotation[0][1] * p.y),
                scale * (rotation[1][0] * p.x + rotation[1][1] * p.y),
            )
        })
        .collect();

    let disparity = a
        .iter()
        .zip(&candidate)
        .map(|(pa, pb)| {
            let dx = pa.x - pb.x;
            let dy = pa.y - pb.y;
            dx * dx + dy * dy
        })
        .sum();

    Some(Superimposition {
        reference: a,
        candidate,
        disparity,
    })
}

/// Center a point set and scale it to unit Frobenius norm.
fn normalized(points: &[TracePoint]) -> Option<Vec<TracePoint>> {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

    let norm = points
        .iter()
        .map(|p| (p.x - cx) * (p.x - cx) + (p.y - cy) * (p.y - cy))
        .sum::<f64>()
        .sqrt();
    if norm == 0.0 {
        return None;
    }

    Some(
        points
            .iter()
            .map(|p| TracePoint::new((p.x - cx) / norm, (p.y - cy) / norm))
            .collect(),
    )
}

/// Solve the 2x2 orthogonal Procrustes problem in closed form.
///
/// Returns the orthogonal matrix `R = U V^T` from the SVD `M = U S V^T`
/// (reflections allowed) and the optimal uniform scale, the sum of singular
/// values.
fn orthogonal_fit(m: [[f64; 2]; 2]) -> ([[f64; 2]; 2], f64) {
    let e = (m[0][0] + m[1][1]) / 2.0;
    let f = (m[0][0] - m[1][1]) / 2.0;
    let g = (m[1][0] + m[0][1]) / 2.0;
    let h = (m[1][0] - m[0][1]) / 2.0;

    let q = e.hypot(h);
    let r = f.hypot(g);

    // Singular values are q + r and |q - r|; a negative q - r means the
    // best orthogonal map includes a reflection.
    let scale = (q + r) + (q - r).abs();
    let flip = if q - r < 0.0 { -1.0 } else { 1.0 };

    let a1 = g.atan2(f);
    let a2 = h.atan2(e);
    let beta = (a2 - a1) / 2.0;
    let gamma = (a2 + a1) / 2.0;

    // R = R(gamma) * diag(1, flip) * R(beta)
    let (sb, cb) = beta.sin_cos();
    let (sg, cg) = gamma.sin_cos();

    let rotation = [
        [cg * cb - sg * flip * sb, -cg * sb - sg * flip * cb],
        [sg * cb + cg * flip * sb, -sg * sb + cg * flip * cb],
    ];
    (rotation, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(n: usize) -> Vec<TracePoint> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64 * std::f64::consts::TAU;
                TracePoint::new(t.cos(), t.sin())
            })
            .collect()
    }

    fn transformed(
        points: &[TracePoint],
        angle: f64,
        scale: f64,
        dx: f64,
        dy: f64,
    ) -> Vec<TracePoint> {
        let (s, c) = angle.sin_cos();
        points
            .iter()
            .map(|p| {
                TracePoint::new(
                    scale * (c * p.x - s * p.y) + dx,
                    scale * (s * p.x + c * p.y) + dy,
                )
            })
            .collect()
    }

    #[test]
    fn test_identical_shapes_have_zero_disparity() {
        let shape = circle(64);
        let fit = superimpose(&shape, &shape).unwrap();
        assert!(fit.disparity < 1e-12);
        // Reference comes back centered with unit norm.
        let norm: f64 = fit
            .reference
            .iter()
            .map(|p| p.x * p.x + p.y * p.y)
            .sum::<f64>()
            .sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_scale_translation_removed() {
        let shape = circle(64);
        let moved = transformed(&shape, 0.7, 3.5, 12.0, -4.0);

        let fit = superimpose(&shape, &moved).unwrap();
        assert!(fit.disparity < 1e-9, "disparity {}", fit.disparity);
        for (a, b) in fit.reference.iter().zip(&fit.candidate) {
            assert!((a.x - b.x).abs() < 1e-6);
            assert!((a.y - b.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reflection_is_fitted() {
        let shape = circle(48);
        let mirrored: Vec<TracePoint> =
            shape.iter().map(|p| TracePoint::new(-p.x, p.y)).collect();

        let fit = superimpose(&shape, &mirrored).unwrap();
        assert!(fit.disparity < 1e-9);
    }

    #[test]
    fn test_degenerate_candidate_rejected() {
        let shape = circle(10);
        let point = vec![TracePoint::new(2.0, 2.0); 10];
        assert!(superimpose(&shape, &point).is_none());
        assert!(superimpose(&point, &shape).is_none());
    }

    #[test]
    fn test_disparity_positive_for_different_shapes() {
        let a = circle(40);
        let b: Vec<TracePoint> = (0..40)
            .map(|i| TracePoint::new(i as f64, (i as f64 * 0.9).sin()))
            .collect();
        let fit = superimpose(&a, &b).unwrap();
        assert!(fit.disparity > 0.01);
    }
}
