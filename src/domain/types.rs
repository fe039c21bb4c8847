//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by reference through the fitting engine
//! - exported to JSON alongside a fitted path
//! - reloaded later for plotting or comparisons

use std::time::Duration;

use chrono::{DateTime, Utc};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::bezier::Path;
use crate::error::FitError;

/// A 2D point or direction. Serialized as `[x, y]`.
pub type Point2 = Vector2<f64>;

/// Endpoint geometry of a chain: start point, outgoing tangent, incoming tangent, end point.
///
/// `t2` points backward from `v3` toward the interior of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub v0: Point2,
    pub t1: Point2,
    pub t2: Point2,
    pub v3: Point2,
}

impl Geometry {
    /// Assemble geometry from optional parts.
    ///
    /// Either all four parts are given or none are; anything in between is rejected.
    pub fn from_parts(
        v0: Option<Point2>,
        t1: Option<Point2>,
        t2: Option<Point2>,
        v3: Option<Point2>,
    ) -> Result<Option<Self>, FitError> {
        match (v0, t1, t2, v3) {
            (Some(v0), Some(t1), Some(t2), Some(v3)) => Ok(Some(Self { v0, t1, t2, v3 })),
            (None, None, None, None) => Ok(None),
            _ => Err(FitError::invalid(
                "endpoint geometry must give all of v0, t1, t2, v3 or none of them",
            )),
        }
    }

    /// Control points of the cubic with interior points `v0 + α0·t1` and `v3 + α1·t2`.
    pub fn control_points(&self, alpha: [f64; 2]) -> [Point2; 4] {
        [self.v0, self.v0 + self.t1 * alpha[0], self.v3 + self.t2 * alpha[1], self.v3]
    }
}

/// Fitting parameters. Immutable for the duration of a fit call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Iteration cap (0 = no cap).
    pub iter_max: u32,
    /// Mean parameter-change threshold (0 = unused).
    pub delta_min: f64,
    /// Distance tolerance ("epsilon"); required for multi-segment fitting.
    pub dist_min: f64,
    /// Fraction of `dist_min` that ends iteration early.
    pub dist_scale: f64,
    /// Minimum acceptable alpha, as a fraction of the chain's end-to-end length.
    pub alpha_min: f64,
    /// Minimum acceptable determinant magnitude of the alpha solve.
    pub det_min: f64,
    /// Newton steps are capped at `nrp_cap / (n - 1)`.
    pub nrp_cap: f64,
    /// 0 = quiet, 1 = per-fit lines, 2 = per-iteration lines (stderr).
    pub verbose: u8,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            iter_max: 12,
            delta_min: 0.0005,
            dist_min: 0.01,
            dist_scale: 0.25,
            alpha_min: 0.001,
            det_min: 1e-6,
            nrp_cap: 3.0,
            verbose: 0,
        }
    }
}

impl FitConfig {
    /// Check the preconditions of a single-segment fit.
    pub fn validate_single(&self) -> Result<(), FitError> {
        let thresholds = [
            ("delta_min", self.delta_min),
            ("dist_min", self.dist_min),
            ("dist_scale", self.dist_scale),
            ("alpha_min", self.alpha_min),
            ("det_min", self.det_min),
        ];
        for (name, value) in thresholds {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FitError::invalid(format!("{name} must be finite and >= 0 (got {value})")));
            }
        }
        if !(self.nrp_cap.is_finite() && self.nrp_cap > 0.0) {
            return Err(FitError::invalid(format!("nrp_cap must be > 0 (got {})", self.nrp_cap)));
        }
        if self.iter_max == 0 && self.delta_min == 0.0 && self.dist_min == 0.0 {
            return Err(FitError::invalid(
                "at least one of iter_max, delta_min, dist_min must be positive",
            ));
        }
        Ok(())
    }

    /// Check the preconditions of a multi-segment fit.
    pub fn validate_multi(&self) -> Result<(), FitError> {
        if !(self.dist_min > 0.0) {
            return Err(FitError::invalid(format!(
                "multi-segment fitting needs dist_min > 0 (got {})",
                self.dist_min
            )));
        }
        self.validate_single()
    }
}

/// Diagnostics of a fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub iterations: u32,
    /// Mean parameter change of the last Newton pass.
    pub delta: f64,
    pub dist_max: f64,
    /// Index of the worst point, relative to the array handed to the top-level call.
    pub dist_max_idx: usize,
    /// Determinant of the alpha solve at termination.
    pub det: f64,
    pub elapsed: Duration,
}

impl FitResult {
    /// Combine diagnostics of two sibling fits.
    ///
    /// Iterations add up; the worst distance wins; the largest delta and the
    /// weakest (smallest magnitude) determinant are kept. `elapsed` keeps the
    /// receiver's value; the caller times the whole operation.
    pub fn merged(&self, other: &FitResult) -> FitResult {
        let (dist_max, dist_max_idx) = if other.dist_max > self.dist_max {
            (other.dist_max, other.dist_max_idx)
        } else {
            (self.dist_max, self.dist_max_idx)
        };
        FitResult {
            iterations: self.iterations + other.iterations,
            delta: self.delta.max(other.delta),
            dist_max,
            dist_max_idx,
            det: if other.det.abs() < self.det.abs() { other.det } else { self.det },
            elapsed: self.elapsed,
        }
    }

    /// Same diagnostics with every index shifted by `offset`.
    pub fn offset_by(mut self, offset: usize) -> FitResult {
        self.dist_max_idx += offset;
        self
    }
}

/// Why a single-segment fit stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopReason {
    /// Two-point chain: closed-form answer, no iteration.
    Degenerate,
    /// Worst distance dropped under `dist_scale * dist_min`.
    Distance,
    /// Mean parameter change dropped under `delta_min`.
    Delta,
    /// `iter_max` reached.
    IterCap,
}

impl StopReason {
    pub fn label(self) -> &'static str {
        match self {
            StopReason::Degenerate => "two points",
            StopReason::Distance => "distance",
            StopReason::Delta => "delta",
            StopReason::IterCap => "iteration cap",
        }
    }
}

/// Output of one single-segment fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleFit {
    pub alpha: [f64; 2],
    pub stop: StopReason,
    /// Final per-point parameters (non-decreasing, 0 first, 1 last).
    pub params: Vec<f64>,
    pub result: FitResult,
}

/// Summary stats about an ingested point chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Total polyline length.
    pub length: f64,
}

impl PointStats {
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut stats = PointStats {
            n_points: points.len(),
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
            length: 0.0,
        };
        for (i, p) in points.iter().enumerate() {
            stats.x_min = stats.x_min.min(p.x);
            stats.x_max = stats.x_max.max(p.x);
            stats.y_min = stats.y_min.min(p.y);
            stats.y_max = stats.y_max.max(p.y);
            if i > 0 {
                stats.length += (p - points[i - 1]).norm();
            }
        }
        Some(stats)
    }
}

/// Portable representation of a fitted path (`cbfit fit --export-path`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub config: FitConfig,
    pub result: FitResult,
    pub path: Path,
}
