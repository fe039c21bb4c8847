//! Single-segment fitting.
//!
//! Given a chain of points and fixed endpoint geometry, find the tangent
//! scale factors of one cubic by alternating:
//!
//! - a least-squares alpha solve at the current parameterization
//! - a Newton reparameterization against the resulting curve
//!
//! until a stop policy fires (distance, delta, or iteration cap).
//!
//! The parameterization is double-buffered: each Newton pass reads one
//! buffer and writes the other, then the two are swapped.

use std::time::Instant;

use crate::domain::{FitConfig, FitResult, Geometry, Point2, SingleFit, StopReason};
use crate::error::{FitError, FitErrorKind};
use crate::fit::{max_distance, reparameterize};
use crate::math::solve_alpha;

/// Safety ceiling on iterations regardless of configuration.
pub const ITER_CEILING: u32 = 100;

/// Fit one cubic to `points` with endpoint geometry `geom`.
pub fn fit_single(points: &[Point2], geom: &Geometry, config: &FitConfig) -> Result<SingleFit, FitError> {
    let start = Instant::now();
    config.validate_single()?;

    let n = points.len();
    if n < 2 {
        return Err(FitError::invalid(format!("need at least 2 points to fit a segment (got {n})")));
    }
    if n == 2 {
        return fit_two_points(points, geom, config, start);
    }

    let mut params = chord_length_params(points);
    let mut scratch = vec![0.0; n];
    let mut iterations = 0u32;
    let mut delta = 0.0;
    let mut first_pass = true;

    let (solve, stop, measured) = loop {
        let solve = solve_alpha(points, &params, geom);
        check_det(solve.det, config, n)?;
        let controls = geom.control_points(solve.alpha);

        let mut measured = None;
        if first_pass {
            first_pass = false;
            let d = max_distance(points, &params, &controls);
            if within_distance(d.0, config) {
                break (solve, StopReason::Distance, Some(d));
            }
            measured = Some(d);
        }

        iterations += 1;
        if config.iter_max > 0 && iterations >= config.iter_max {
            break (solve, StopReason::IterCap, measured);
        }
        if iterations > ITER_CEILING {
            return Err(FitError::new(
                FitErrorKind::NonConvergence,
                format!("no convergence after {ITER_CEILING} iterations on {n} points (last delta {delta:.3e})"),
            ));
        }

        delta = reparameterize(points, &controls, &params, &mut scratch, config.nrp_cap);
        std::mem::swap(&mut params, &mut scratch);
        if config.delta_min > 0.0 && delta <= config.delta_min {
            break (solve, StopReason::Delta, None);
        }

        let d = max_distance(points, &params, &controls);
        if config.verbose >= 2 {
            eprintln!(
                "  iter {iterations}: alpha=({:.6}, {:.6}) delta={delta:.3e} dist={:.6} @{}",
                solve.alpha[0], solve.alpha[1], d.0, d.1
            );
        }
        if within_distance(d.0, config) {
            break (solve, StopReason::Distance, Some(d));
        }
    };

    // Report the distance of the final alpha at the final parameterization.
    let (dist_max, dist_max_idx) =
        measured.unwrap_or_else(|| max_distance(points, &params, &geom.control_points(solve.alpha)));

    Ok(SingleFit {
        alpha: solve.alpha,
        stop,
        params,
        result: FitResult {
            iterations,
            delta,
            dist_max,
            dist_max_idx,
            det: solve.det,
            elapsed: start.elapsed(),
        },
    })
}

/// Closed-form answer for a two-point chain: each interior control point sits
/// a third of the chord away from its endpoint.
fn fit_two_points(
    points: &[Point2],
    geom: &Geometry,
    config: &FitConfig,
    start: Instant,
) -> Result<SingleFit, FitError> {
    // Determinant of the decoupled per-tangent system.
    let det = geom.t1.norm_squared() * geom.t2.norm_squared();
    check_det(det, config, 2)?;

    let chord = (points[1] - points[0]).norm();
    let alpha = [chord / (3.0 * geom.t1.norm()), chord / (3.0 * geom.t2.norm())];

    Ok(SingleFit {
        alpha,
        stop: StopReason::Degenerate,
        params: vec![0.0, 1.0],
        result: FitResult {
            iterations: 0,
            delta: 0.0,
            dist_max: 0.0,
            dist_max_idx: 0,
            det,
            elapsed: start.elapsed(),
        },
    })
}

/// Cumulative chord length normalized to `[0, 1]`, last entry exactly 1.
///
/// A chain of coincident points falls back to uniform spacing.
pub fn chord_length_params(points: &[Point2]) -> Vec<f64> {
    let n = points.len();
    let mut params = Vec::with_capacity(n);
    let mut acc = 0.0;
    params.push(0.0);
    for w in points.windows(2) {
        acc += (w[1] - w[0]).norm();
        params.push(acc);
    }
    if n < 2 {
        return params;
    }
    if acc > 0.0 && acc.is_finite() {
        for u in params.iter_mut() {
            *u /= acc;
        }
    } else {
        for (i, u) in params.iter_mut().enumerate() {
            *u = i as f64 / (n - 1) as f64;
        }
    }
    params[n - 1] = 1.0;
    params
}

fn check_det(det: f64, config: &FitConfig, n: usize) -> Result<(), FitError> {
    if !det.is_finite() || det.abs() <= config.det_min {
        return Err(FitError::new(
            FitErrorKind::IllConditioned,
            format!("alpha solve determinant {det:.3e} <= {:.3e} on {n} points", config.det_min),
        ));
    }
    Ok(())
}

fn within_distance(dist: f64, config: &FitConfig) -> bool {
    config.dist_min > 0.0 && dist <= config.dist_scale * config.dist_min
}
