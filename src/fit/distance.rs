//! Worst-point distance between data and a candidate segment.

use crate::bezier::eval_controls;
use crate::domain::Point2;
use crate::math::Order;

/// Largest Euclidean distance between `points[i]` and the curve at `params[i]`.
///
/// Returns `(distance, index)`; on ties the first index wins. With 3 or more
/// points only interior points are scanned: the endpoints are pinned by the
/// endpoint geometry, and the returned index must be a usable split point.
/// Returns `(0.0, 0)` for an empty slice.
pub fn max_distance(points: &[Point2], params: &[f64], controls: &[Point2; 4]) -> (f64, usize) {
    let n = points.len().min(params.len());
    let scan = if n >= 3 { 1..n - 1 } else { 0..n };

    let mut worst = (0.0, scan.start);
    let mut first = true;
    for i in scan {
        let d = (eval_controls(controls, params[i], Order::Value) - points[i]).norm();
        // NaN never wins a comparison, so it is surfaced explicitly.
        if first || d > worst.0 || d.is_nan() {
            worst = (d, i);
            first = false;
            if d.is_nan() {
                break;
            }
        }
    }
    worst
}
