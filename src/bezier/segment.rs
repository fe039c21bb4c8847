//! One cubic Bezier segment.

use serde::{Deserialize, Serialize};

use crate::domain::Point2;
use crate::math::{Order, bernstein};

/// Control points `P0..P3` of one cubic plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub points: [Point2; 4],
    /// Corner markers for the start/end vertex. Reserved: the fitter never sets them.
    pub corner: [bool; 2],
    /// Number of data points this segment approximates (shared endpoints included).
    pub point_num: usize,
}

impl Segment {
    pub fn new(points: [Point2; 4], point_num: usize) -> Self {
        Self {
            points,
            corner: [false, false],
            point_num,
        }
    }

    pub fn start(&self) -> Point2 {
        self.points[0]
    }

    pub fn end(&self) -> Point2 {
        self.points[3]
    }

    /// Point on the curve at `t`.
    pub fn eval(&self, t: f64) -> Point2 {
        eval_controls(&self.points, t, Order::Value)
    }

    /// First or second derivative at `t` (or the value, for `Order::Value`).
    pub fn derivative(&self, t: f64, order: Order) -> Point2 {
        eval_controls(&self.points, t, order)
    }
}

/// Weighted sum of the four control points with the basis weights of `order` at `t`.
pub fn eval_controls(points: &[Point2; 4], t: f64, order: Order) -> Point2 {
    let w = bernstein(t, order);
    points[0] * w[0] + points[1] * w[1] + points[2] * w[2] + points[3] * w[3]
}
