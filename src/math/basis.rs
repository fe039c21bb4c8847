//! Cubic Bernstein basis weights and their derivatives.
//!
//! The cubic Bezier with control points `P0..P3` is
//!
//! - `Q(t) = (1-t)^3 P0 + 3t(1-t)^2 P1 + 3t^2(1-t) P2 + t^3 P3`
//!
//! and its derivatives are obtained by differentiating the weights, so every
//! evaluation is a weighted sum of the same four control points.
//!
//! The weights are plain polynomials: they are defined for any real `t`, also
//! outside `[0, 1]` (Newton steps may briefly probe there).

/// Which derivative of the basis to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Value,
    First,
    Second,
}

/// The 4 basis weights (or derivative weights) at `t`.
pub fn bernstein(t: f64, order: Order) -> [f64; 4] {
    let s = 1.0 - t;
    match order {
        Order::Value => [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t],
        Order::First => [
            -3.0 * s * s,
            3.0 * s * (s - 2.0 * t),
            3.0 * t * (2.0 * s - t),
            3.0 * t * t,
        ],
        Order::Second => [6.0 * s, 6.0 * (3.0 * t - 2.0), 6.0 * (1.0 - 3.0 * t), 6.0 * t],
    }
}
