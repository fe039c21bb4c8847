//! Newton reparameterization.
//!
//! Each interior point's parameter `u` is moved toward the foot of the
//! perpendicular from the point onto the current curve by one Newton step on
//! `f(u) = (Q(u) - p) · Q'(u)`:
//!
//! ```text
//! Δu = -((Q - p) · Q') / (Q' · Q' + (Q - p) · Q'')
//! ```
//!
//! The step is clamped to `nrp_cap / (n - 1)` (sign kept), and the result is
//! clamped into `[previous new parameter, 1]` so the parameterization stays
//! non-decreasing. Endpoints keep their parameters (0 and 1).

use crate::bezier::eval_controls;
use crate::domain::Point2;
use crate::math::Order;

/// One Newton pass reading `src` and writing `dst`.
///
/// Returns the mean absolute applied change over interior points (0 when
/// there are none).
pub fn reparameterize(
    points: &[Point2],
    controls: &[Point2; 4],
    src: &[f64],
    dst: &mut [f64],
    nrp_cap: f64,
) -> f64 {
    let n = points.len();
    debug_assert!(src.len() == n && dst.len() == n);
    if n == 0 {
        return 0.0;
    }
    dst[0] = src[0];
    dst[n - 1] = src[n - 1];
    if n < 3 {
        return 0.0;
    }

    let max_step = nrp_cap / (n - 1) as f64;
    let mut total = 0.0;
    for i in 1..n - 1 {
        let u = src[i];
        let q = eval_controls(controls, u, Order::Value);
        let q1 = eval_controls(controls, u, Order::First);
        let q2 = eval_controls(controls, u, Order::Second);
        let diff = q - points[i];

        let mut step = -diff.dot(&q1) / (q1.dot(&q1) + diff.dot(&q2));
        if !step.is_finite() {
            // Flat spot of the Newton function; leave the parameter where it is.
            step = 0.0;
        }
        if step.abs() > max_step {
            step = max_step.copysign(step);
        }

        let next = (u + step).max(dst[i - 1]).min(dst[n - 1]);
        total += (next - u).abs();
        dst[i] = next;
    }
    total / (n - 2) as f64
}
