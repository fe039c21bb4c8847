//! Least-squares solve for the tangent scale factors ("alphas").
//!
//! With fixed endpoints `V0`, `V3`, unit-free tangents `T1`, `T2` and a fixed
//! parameter `u_i` per data point `p_i`, the curve is linear in `(α0, α1)`:
//!
//! ```text
//! Q(u) = (b0 + b1) V0 + (b2 + b3) V3 + α0 (b1 T1) + α1 (b2 T2)
//! ```
//!
//! Minimizing `Σ |p_i - Q(u_i)|²` gives the 2x2 normal equations `M α = X`
//! which we solve with the explicit inverse. The determinant of `M` is
//! returned as the conditioning diagnostic; judging it is up to the caller.

use nalgebra::{Matrix2, Vector2};

use crate::domain::{Geometry, Point2};
use crate::math::{Order, bernstein};

/// Output of one alpha solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaSolve {
    pub alpha: [f64; 2],
    pub det: f64,
}

/// Solve for `(α0, α1)` given points and their current parameters.
///
/// `points` and `params` must have the same length. When the determinant is
/// exactly zero both alphas are NaN.
pub fn solve_alpha(points: &[Point2], params: &[f64], geom: &Geometry) -> AlphaSolve {
    debug_assert_eq!(points.len(), params.len());

    let mut m = Matrix2::<f64>::zeros();
    let mut x = Vector2::<f64>::zeros();
    for (p, &u) in points.iter().zip(params) {
        let b = bernstein(u, Order::Value);
        let a1 = geom.t1 * b[1];
        let a2 = geom.t2 * b[2];
        m[(0, 0)] += a1.dot(&a1);
        m[(0, 1)] += a1.dot(&a2);
        m[(1, 1)] += a2.dot(&a2);

        let baseline = geom.v0 * (b[0] + b[1]) + geom.v3 * (b[2] + b[3]);
        let r = p - baseline;
        x[0] += r.dot(&a1);
        x[1] += r.dot(&a2);
    }
    m[(1, 0)] = m[(0, 1)];

    let det = m.determinant();
    if det == 0.0 {
        return AlphaSolve {
            alpha: [f64::NAN, f64::NAN],
            det,
        };
    }
    let alpha = [
        (m[(1, 1)] * x[0] - m[(0, 1)] * x[1]) / det,
        (m[(0, 0)] * x[1] - m[(0, 1)] * x[0]) / det,
    ];
    AlphaSolve { alpha, det }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::Segment;

    #[test]
    fn recovers_alphas_of_exact_cubic() {
        let s5 = 5.0_f64.sqrt();
        let seg = Segment::new(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 2.0),
                Point2::new(4.0, 0.0),
            ],
            11,
        );
        let params: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let points: Vec<Point2> = params.iter().map(|&u| seg.eval(u)).collect();
        let geom = Geometry {
            v0: seg.points[0],
            t1: Point2::new(1.0, 2.0) / s5,
            t2: Point2::new(-1.0, 2.0) / s5,
            v3: seg.points[3],
        };

        let solve = solve_alpha(&points, &params, &geom);
        assert!(solve.det > 0.0);
        assert!((solve.alpha[0] - s5).abs() < 1e-9, "alpha0={}", solve.alpha[0]);
        assert!((solve.alpha[1] - s5).abs() < 1e-9, "alpha1={}", solve.alpha[1]);
    }

    #[test]
    fn collinear_points_give_thirds() {
        let points: Vec<Point2> = (0..5).map(|i| Point2::new(i as f64, 0.0)).collect();
        let params: Vec<f64> = (0..5).map(|i| i as f64 / 4.0).collect();
        let geom = Geometry {
            v0: points[0],
            t1: Point2::new(1.0, 0.0),
            t2: Point2::new(-1.0, 0.0),
            v3: points[4],
        };
        let solve = solve_alpha(&points, &params, &geom);
        assert!((solve.alpha[0] - 4.0 / 3.0).abs() < 1e-9);
        assert!((solve.alpha[1] - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tangents_give_zero_determinant() {
        let points = [Point2::new(0.0, 0.0), Point2::new(0.5, 0.1), Point2::new(1.0, 0.0)];
        let params = [0.0, 0.5, 1.0];
        let geom = Geometry {
            v0: points[0],
            t1: Point2::zeros(),
            t2: Point2::zeros(),
            v3: points[2],
        };
        let solve = solve_alpha(&points, &params, &geom);
        assert_eq!(solve.det, 0.0);
        assert!(solve.alpha[0].is_nan() && solve.alpha[1].is_nan());
    }
}
