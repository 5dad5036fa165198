use glam::Vec3;

use crate::surface::surface_point;

/// Estimates the surface normal at `(i, j)` by averaging the normals of the six
/// triangles fanned around it.
///
/// Neighbours are taken in ring order:
///
/// ```text
///   +i        (i + step_i, j)
///   +j        (i, j + step_j)
///   -i +j     (i - step_i, j + step_j)
///   -i        (i - step_i, j)
///   -i -j     (i - step_i, j - step_j)
///   -j        (i, j - step_j)
/// ```
///
/// Each fan normal is the normalized cross product of two consecutive edge
/// vectors; the six are averaged and normalized again.
///
/// A degenerate fan triangle contributes nothing, and a degenerate average
/// falls back to `+Z`, so the result is always a finite unit vector.
pub fn estimate_normal(i: f32, j: f32, step_j: f32, step_i: f32) -> Vec3 {
    let center = surface_point(i, j);

    let ring = [
        surface_point(i + step_i, j),
        surface_point(i, j + step_j),
        surface_point(i - step_i, j + step_j),
        surface_point(i - step_i, j),
        surface_point(i - step_i, j - step_j),
        surface_point(i, j - step_j),
    ];
    let edges = ring.map(|p| p - center);

    let sum: Vec3 = (0..edges.len())
        .map(|k| {
            let next = edges[(k + 1) % edges.len()];
            edges[k].cross(next).normalize_or_zero()
        })
        .sum();

    (sum / edges.len() as f32).normalize_or(Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 2.0 / 30.0;

    fn analytic(x: f32, y: f32) -> Vec3 {
        // Gradient of z = x³/3 − y²/2 is (x², −y); normal is (−x², y, 1).
        Vec3::new(-x * x, y, 1.0).normalize()
    }

    #[test]
    fn unit_length_over_domain() {
        for a in -15..=15 {
            for b in -15..=15 {
                let n = estimate_normal(a as f32 * STEP, b as f32 * STEP, STEP, STEP);
                assert!((n.length() - 1.0).abs() < 1e-5, "n = {n:?}");
            }
        }
    }

    #[test]
    fn flat_origin_points_up() {
        let n = estimate_normal(0.0, 0.0, STEP, STEP);
        assert!(n.z > 0.99, "n = {n:?}");
    }

    #[test]
    fn close_to_analytic_normal() {
        for &(x, y) in &[(0.5, 0.5), (-0.7, 0.2), (0.9, -0.9), (-1.0, -1.0)] {
            let n = estimate_normal(x, y, STEP, STEP);
            let expected = analytic(x, y);
            assert!(n.dot(expected) > 0.99, "{x},{y}: {n:?} vs {expected:?}");
        }
    }

    #[test]
    fn zero_step_falls_back_to_up() {
        let n = estimate_normal(0.3, -0.4, 0.0, 0.0);
        assert_eq!(n, Vec3::Z);
    }

    #[test]
    fn boundary_points_are_finite() {
        for &(x, y) in &[(-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (1.0, -1.0)] {
            let n = estimate_normal(x, y, STEP, STEP);
            assert!(n.is_finite());
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
