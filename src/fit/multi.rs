//! Multi-segment fitting by adaptive subdivision.
//!
//! A chain is first fit with a single cubic. If the fit is not good enough
//! (distance above `dist_min`, or a tangent scale too small relative to the
//! chain length), the chain is split at its worst point and both halves are
//! fit with a shared tangent at the split, so the joined path is tangent
//! continuous there.
//!
//! Subdivision runs over an explicit LIFO work list. The right half is pushed
//! before the left so halves are visited, and segments emitted, in order.

use std::time::Instant;

use crate::bezier::{Path, Segment};
use crate::domain::{FitConfig, FitResult, Geometry, Point2};
use crate::error::{FitError, FitErrorKind};
use crate::fit::{estimate_geometry, fit_single, split_tangent};

/// A pending sub-chain `points[lo..=hi]` with its endpoint geometry.
#[derive(Debug, Clone, Copy)]
struct Chain {
    lo: usize,
    hi: usize,
    geom: Geometry,
}

/// Fit `points` with as many segments as needed and append them to `path`.
///
/// With `geometry == None` the endpoint tangents are estimated from the first
/// and last pairs of points. On error `path` is left untouched.
pub fn fit_multi(
    path: &mut Path,
    points: &[Point2],
    geometry: Option<&Geometry>,
    config: &FitConfig,
) -> Result<FitResult, FitError> {
    let start = Instant::now();
    config.validate_multi()?;

    let n = points.len();
    if n < 2 {
        return Err(FitError::invalid(format!("need at least 2 points to fit a path (got {n})")));
    }
    let geom = match geometry {
        Some(g) => *g,
        None => estimate_geometry(points)?,
    };

    // Segments land in a scratch path first so a failure leaves no partial output.
    let mut fitted = Path::new();
    let mut merged: Option<FitResult> = None;
    let mut work = vec![Chain { lo: 0, hi: n - 1, geom }];

    while let Some(chain) = work.pop() {
        let span = &points[chain.lo..=chain.hi];
        let fit = fit_single(span, &chain.geom, config)?;

        let length = (span[span.len() - 1] - span[0]).norm();
        let alpha_floor = config.alpha_min * length;
        let accepted = fit.result.dist_max <= config.dist_min
            && fit.alpha[0].abs() > alpha_floor
            && fit.alpha[1].abs() > alpha_floor;

        if accepted {
            if config.verbose >= 1 {
                eprintln!(
                    "[{}..{}] accept: alpha=({:.4}, {:.4}) dist={:.5} iters={} ({})",
                    chain.lo,
                    chain.hi,
                    fit.alpha[0],
                    fit.alpha[1],
                    fit.result.dist_max,
                    fit.result.iterations,
                    fit.stop.label()
                );
            }
            fitted.append(Segment::new(chain.geom.control_points(fit.alpha), span.len()));
            let leaf = fit.result.offset_by(chain.lo);
            merged = Some(match merged {
                Some(acc) => acc.merged(&leaf),
                None => leaf,
            });
            continue;
        }

        let local = fit.result.dist_max_idx;
        if local == 0 || local + 1 >= span.len() {
            return Err(FitError::new(
                FitErrorKind::RecursionDegenerate,
                format!(
                    "worst point of chain [{}..{}] is its endpoint {} (dist {:.5})",
                    chain.lo,
                    chain.hi,
                    chain.lo + local,
                    fit.result.dist_max
                ),
            ));
        }

        let at = chain.lo + local;
        let tangent = split_tangent(points, at)?;
        if config.verbose >= 1 {
            eprintln!(
                "[{}..{}] split at {at}: dist={:.5} alpha=({:.4}, {:.4})",
                chain.lo, chain.hi, fit.result.dist_max, fit.alpha[0], fit.alpha[1]
            );
        }

        work.push(Chain {
            lo: at,
            hi: chain.hi,
            geom: Geometry {
                v0: points[at],
                t1: tangent,
                t2: chain.geom.t2,
                v3: chain.geom.v3,
            },
        });
        work.push(Chain {
            lo: chain.lo,
            hi: at,
            geom: Geometry {
                v0: chain.geom.v0,
                t1: chain.geom.t1,
                t2: -tangent,
                v3: points[at],
            },
        });
    }

    let mut result = merged.ok_or_else(|| FitError::invalid("subdivision produced no segments"))?;
    result.elapsed = start.elapsed();
    path.join(fitted);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SynthSpec, synthesize};
    use std::f64::consts::PI;

    fn line5() -> Vec<Point2> {
        (0..5).map(|i| Point2::new(i as f64, 0.0)).collect()
    }

    fn l_shape() -> Vec<Point2> {
        let mut points: Vec<Point2> = (0..=10).map(|i| Point2::new(i as f64, 0.0)).collect();
        points.extend((1..=10).map(|j| Point2::new(10.0, j as f64)));
        points
    }

    fn sine(n: usize) -> Vec<Point2> {
        (0..n)
            .map(|i| {
                let x = 2.0 * PI * i as f64 / (n - 1) as f64;
                Point2::new(x, x.sin())
            })
            .collect()
    }

    fn assert_continuous(path: &Path, n_points: usize) {
        let segs = path.segments();
        for w in segs.windows(2) {
            assert_eq!(w[0].end(), w[1].start());
        }
        let represented: usize = segs.iter().map(|s| s.point_num).sum();
        assert_eq!(represented - (segs.len() - 1), n_points);
    }

    #[test]
    fn collinear_chain_is_one_segment() {
        let points = line5();
        let mut path = Path::new();
        let result = fit_multi(&mut path, &points, None, &FitConfig::default()).unwrap();

        assert_eq!(path.len(), 1);
        let seg = &path.segments()[0];
        assert_eq!(seg.point_num, 5);
        let expected = [0.0, 4.0 / 3.0, 8.0 / 3.0, 4.0];
        for (p, x) in seg.points.iter().zip(expected) {
            assert!((p.x - x).abs() < 1e-9 && p.y.abs() < 1e-12, "got {p:?}");
        }
        assert_eq!(result.iterations, 0);
        assert!(result.dist_max < 1e-9);
    }

    #[test]
    fn l_shape_splits_at_corner() {
        let points = l_shape();
        let cfg = FitConfig { dist_min: 0.1, ..FitConfig::default() };
        let mut path = Path::new();
        let result = fit_multi(&mut path, &points, None, &cfg).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path.segments()[0].end(), Point2::new(10.0, 0.0));
        assert_eq!(path.segments()[0].point_num, 11);
        assert_eq!(path.segments()[1].point_num, 11);
        assert_continuous(&path, points.len());
        assert!(result.dist_max <= cfg.dist_min);
        assert!(result.dist_max_idx < points.len());
    }

    #[test]
    fn loose_tolerance_keeps_one_segment() {
        let points = l_shape();
        let cfg = FitConfig { dist_min: 0.5, ..FitConfig::default() };
        let mut path = Path::new();
        let result = fit_multi(&mut path, &points, None, &cfg).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.segments()[0].point_num, 21);
        assert_eq!(result.dist_max_idx, 10);
    }

    #[test]
    fn split_tangent_is_shared() {
        let points = sine(40);
        let mut path = Path::new();
        let cfg = FitConfig::default();
        let result = fit_multi(&mut path, &points, None, &cfg).unwrap();

        assert!(path.len() >= 2, "sine should need several segments");
        assert_continuous(&path, points.len());
        assert!(result.dist_max <= cfg.dist_min);
        for w in path.segments().windows(2) {
            let incoming = (w[0].points[3] - w[0].points[2]).normalize();
            let outgoing = (w[1].points[1] - w[1].points[0]).normalize();
            assert!(incoming.dot(&outgoing) > 1.0 - 1e-9, "kink between segments");
        }
    }

    #[test]
    fn repeated_fits_are_identical() {
        let points = sine(60);
        let cfg = FitConfig::default();
        let mut a = Path::new();
        let mut b = Path::new();
        let ra = fit_multi(&mut a, &points, None, &cfg).unwrap();
        let rb = fit_multi(&mut b, &points, None, &cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(ra.iterations, rb.iterations);
        assert_eq!(ra.dist_max, rb.dist_max);
        assert_eq!(ra.dist_max_idx, rb.dist_max_idx);
        assert_eq!(ra.delta, rb.delta);
        assert_eq!(ra.det, rb.det);
    }

    #[test]
    fn zero_tangents_fail_without_touching_path() {
        let points = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let geom = Geometry {
            v0: points[0],
            t1: Point2::zeros(),
            t2: Point2::zeros(),
            v3: points[1],
        };
        let mut path = Path::new();
        fit_multi(&mut path, &line5(), None, &FitConfig::default()).unwrap();
        let before = path.clone();

        let err = fit_multi(&mut path, &points, Some(&geom), &FitConfig::default()).unwrap_err();
        assert_eq!(err.kind(), FitErrorKind::IllConditioned);
        assert_eq!(path, before);
    }

    #[test]
    fn rejected_two_point_chain_is_degenerate() {
        // Coincident points give zero alphas, which never clear the alpha floor,
        // and a two-point chain has no interior point to split at.
        let points = [Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)];
        let geom = Geometry {
            v0: points[0],
            t1: Point2::new(1.0, 0.0),
            t2: Point2::new(-1.0, 0.0),
            v3: points[1],
        };
        let mut path = Path::new();
        let err = fit_multi(&mut path, &points, Some(&geom), &FitConfig::default()).unwrap_err();
        assert_eq!(err.kind(), FitErrorKind::RecursionDegenerate);
        assert!(path.is_empty());
    }

    #[test]
    fn exact_short_chains_split_at_interior_points() {
        // Noise-free points on one cubic with uneven spacing; some sub-chains fit
        // with zero distance but a tiny alpha and must still be split.
        let s = 0.5_f64.sqrt();
        let spec = SynthSpec {
            geometry: Geometry {
                v0: Point2::new(0.0, 0.0),
                t1: Point2::new(s, s),
                t2: Point2::new(-s, s),
                v3: Point2::new(4.0, 0.0),
            },
            alpha: [3.4, 3.0],
            count: 7,
            warp: 1.5,
            noise: 0.0,
            seed: 0,
        };
        let points = synthesize(&spec).unwrap();
        let cfg = FitConfig::default();
        let mut path = Path::new();
        let result = fit_multi(&mut path, &points, None, &cfg).unwrap();
        assert!(result.dist_max <= cfg.dist_min);
        assert_continuous(&path, points.len());
    }

    #[test]
    fn requires_positive_tolerance() {
        let cfg = FitConfig { dist_min: 0.0, ..FitConfig::default() };
        let mut path = Path::new();
        let err = fit_multi(&mut path, &line5(), None, &cfg).unwrap_err();
        assert_eq!(err.kind(), FitErrorKind::InvalidInput);

        let err = fit_multi(&mut path, &line5()[..1], None, &FitConfig::default()).unwrap_err();
        assert_eq!(err.kind(), FitErrorKind::InvalidInput);
    }
}
