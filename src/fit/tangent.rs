//! Finite-difference tangent estimates.
//!
//! A TVT ("tangent, vertex, tangent") triple describes the local geometry at
//! one point of a chain:
//!
//! - `left`: unit direction from the vertex back toward earlier points
//! - `vertex`: the point itself
//! - `right`: unit direction from the vertex toward later points
//!
//! Neighbor indices are clamped into the span `[lo, hi]`, so the first and
//! last points of a span always get one-sided estimates. No smoothing is
//! applied.

use crate::domain::{Geometry, Point2};
use crate::error::FitError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tvt {
    pub left: Point2,
    pub vertex: Point2,
    pub right: Point2,
}

/// Estimate the TVT at index `lo + offset` within the span `[lo, hi]`.
///
/// Two-sided estimates use the chord between both neighbors (so `left ==
/// -right`); one-sided estimates use the chord from the vertex to each
/// neighbor. A direction that cannot be normalized comes back as zero.
pub fn find_tvt(points: &[Point2], lo: usize, hi: usize, offset: usize, one_sided: bool) -> Result<Tvt, FitError> {
    if lo >= hi {
        return Err(FitError::invalid(format!("tangent span needs lo < hi (got {lo}..{hi})")));
    }
    if hi >= points.len() {
        return Err(FitError::invalid(format!(
            "tangent span end {hi} is past the last point index {}",
            points.len().saturating_sub(1)
        )));
    }
    let at = lo
        .checked_add(offset)
        .filter(|&at| at <= hi)
        .ok_or_else(|| FitError::invalid(format!("offset {offset} is past the span {lo}..{hi}")))?;

    let prev = points[at.saturating_sub(1).max(lo)];
    let next = points[(at + 1).min(hi)];
    let vertex = points[at];

    let (left, right) = if one_sided {
        (unit(prev - vertex), unit(next - vertex))
    } else {
        let right = unit(next - prev);
        (-right, right)
    };
    Ok(Tvt { left, vertex, right })
}

/// Endpoint geometry of a whole chain from one-sided estimates at both ends.
pub fn estimate_geometry(points: &[Point2]) -> Result<Geometry, FitError> {
    let last = points
        .len()
        .checked_sub(1)
        .filter(|&last| last > 0)
        .ok_or_else(|| FitError::invalid(format!("need at least 2 points (got {})", points.len())))?;
    let start = find_tvt(points, 0, last, 0, true)?;
    let end = find_tvt(points, 0, last, last, true)?;
    Ok(Geometry {
        v0: start.vertex,
        t1: start.right,
        t2: end.left,
        v3: end.vertex,
    })
}

/// Two-sided tangent through interior point `at`, used where a chain is split.
pub fn split_tangent(points: &[Point2], at: usize) -> Result<Point2, FitError> {
    if at == 0 || at + 1 >= points.len() {
        return Err(FitError::invalid(format!("split index {at} is not interior")));
    }
    Ok(unit(points[at + 1] - points[at - 1]))
}

fn unit(v: Point2) -> Point2 {
    v.try_normalize(0.0).unwrap_or_else(Point2::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitErrorKind;

    fn corner() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 5.0),
        ]
    }

    #[test]
    fn one_sided_at_corner() {
        let tvt = find_tvt(&corner(), 0, 3, 1, true).unwrap();
        assert_eq!(tvt.vertex, Point2::new(2.0, 0.0));
        assert_eq!(tvt.left, Point2::new(-1.0, 0.0));
        assert_eq!(tvt.right, Point2::new(0.0, 1.0));
    }

    #[test]
    fn two_sided_uses_neighbor_chord() {
        let tvt = find_tvt(&corner(), 0, 3, 1, false).unwrap();
        let s = 0.5_f64.sqrt();
        assert!((tvt.right - Point2::new(s, s)).norm() < 1e-12);
        assert_eq!(tvt.left, -tvt.right);
    }

    #[test]
    fn span_ends_are_clamped() {
        // Span [1, 3]: at its first point the previous neighbor is the point itself.
        let tvt = find_tvt(&corner(), 1, 3, 0, true).unwrap();
        assert_eq!(tvt.left, Point2::zeros());
        assert_eq!(tvt.right, Point2::new(0.0, 1.0));

        let tvt = find_tvt(&corner(), 1, 3, 2, false).unwrap();
        assert_eq!(tvt.vertex, Point2::new(2.0, 5.0));
        assert_eq!(tvt.right, Point2::new(0.0, 1.0));
    }

    #[test]
    fn bad_spans_are_rejected() {
        let pts = corner();
        assert_eq!(find_tvt(&pts, 2, 2, 0, true).unwrap_err().kind(), FitErrorKind::InvalidInput);
        assert!(find_tvt(&pts, 0, 4, 0, true).is_err());
        assert!(find_tvt(&pts, 1, 3, 3, true).is_err());
        let err = find_tvt(&pts, 1, 3, usize::MAX, false).unwrap_err();
        assert_eq!(err.kind(), FitErrorKind::InvalidInput);
        assert!(split_tangent(&pts, 0).is_err());
        assert!(split_tangent(&pts, 3).is_err());
    }

    #[test]
    fn chain_geometry_from_end_estimates() {
        let geom = estimate_geometry(&corner()).unwrap();
        assert_eq!(geom.v0, Point2::new(0.0, 0.0));
        assert_eq!(geom.t1, Point2::new(1.0, 0.0));
        assert_eq!(geom.t2, Point2::new(0.0, -1.0));
        assert_eq!(geom.v3, Point2::new(2.0, 5.0));
        assert!(estimate_geometry(&corner()[..1]).is_err());
    }
}
