//! Ordered chain of cubic segments.
//!
//! Segment order is traversal order: `segments()[i].end()` is where
//! `segments()[i + 1]` starts for any path produced by the fitter.
//!
//! Evaluation treats the path as one curve over a global parameter where each
//! segment occupies an equal share, regardless of its arc length.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bezier::Segment;
use crate::domain::Point2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<Segment>,
    /// Declared for completeness; open paths are the only kind fitted.
    closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Move all segments of `other` onto the end of this path, preserving order.
    pub fn join(&mut self, other: Path) {
        self.segments.extend(other.segments);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Segment endpoints in order (`len() + 1` points for a non-empty path).
    pub fn joints(&self) -> Vec<Point2> {
        let mut out = Vec::with_capacity(self.segments.len() + 1);
        if let Some(first) = self.segments.first() {
            out.push(first.start());
        }
        out.extend(self.segments.iter().map(Segment::end));
        out
    }

    /// Evaluate at global `t` in `[0, 1]` (clamped). `None` for an empty path.
    pub fn eval(&self, t: f64) -> Option<Point2> {
        if self.segments.is_empty() {
            return None;
        }
        let s = t.clamp(0.0, 1.0) * self.segments.len() as f64;
        Some(self.eval_global(s))
    }

    /// `count` points spread uniformly over segment-index space, first and last
    /// landing exactly on the path's endpoints.
    pub fn sample(&self, count: usize) -> Vec<Point2> {
        if self.segments.is_empty() || count == 0 {
            return Vec::new();
        }
        if count == 1 {
            return vec![self.segments[0].start()];
        }
        let span = self.segments.len() as f64;
        let denom = (count - 1) as f64;
        (0..count)
            .into_par_iter()
            .map(|i| self.eval_global(i as f64 * span / denom))
            .collect()
    }

    /// `s` in `[0, len]`: integer part picks the segment, fraction is the local parameter.
    fn eval_global(&self, s: f64) -> Point2 {
        let last = self.segments.len() - 1;
        let idx = (s.floor().max(0.0) as usize).min(last);
        self.segments[idx].eval(s - idx as f64)
    }
}
