//! Shared "fit pipeline" logic behind `cbfit fit`.
//!
//! Keeping this in one place keeps the command handlers about presentation:
//! ingest -> geometry -> fit (multi or single) -> path + diagnostics

use crate::bezier::{Path, Segment};
use crate::domain::{FitConfig, FitResult, Geometry, Point2, SingleFit};
use crate::error::AppError;
use crate::fit::{estimate_geometry, fit_multi, fit_single};
use crate::io::ingest::IngestedPoints;

/// How a point list is turned into a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Adaptive subdivision within the distance tolerance.
    Multi,
    /// Exactly one segment, however well it fits.
    Single,
}

/// All computed outputs of a single `cbfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPoints,
    pub path: Path,
    pub result: FitResult,
    /// Convergence details, only for `FitMode::Single`.
    pub single: Option<SingleFit>,
}

/// Fit an ingested point list.
pub fn run_fit(
    ingest: IngestedPoints,
    geometry: Option<Geometry>,
    config: &FitConfig,
    mode: FitMode,
) -> Result<RunOutput, AppError> {
    let mut path = Path::new();
    let (result, single) = match mode {
        FitMode::Multi => (fit_multi(&mut path, &ingest.points, geometry.as_ref(), config)?, None),
        FitMode::Single => {
            let fit = fit_one(&mut path, &ingest.points, geometry, config)?;
            (fit.result.clone(), Some(fit))
        }
    };

    if config.verbose >= 1 {
        eprintln!(
            "fit: {} points -> {} segment(s), dist max {:.6} @{}",
            ingest.points.len(),
            path.len(),
            result.dist_max,
            result.dist_max_idx
        );
    }

    Ok(RunOutput {
        ingest,
        path,
        result,
        single,
    })
}

fn fit_one(
    path: &mut Path,
    points: &[Point2],
    geometry: Option<Geometry>,
    config: &FitConfig,
) -> Result<SingleFit, AppError> {
    let geom = match geometry {
        Some(g) => g,
        None => estimate_geometry(points)?,
    };
    let fit = fit_single(points, &geom, config)?;
    path.append(Segment::new(geom.control_points(fit.alpha), points.len()));
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopReason;
    use crate::io::ingest::parse_points;

    fn arch_points() -> IngestedPoints {
        let mut text = String::from("x,y\n");
        for i in 0..=20 {
            let x = i as f64 / 5.0;
            text.push_str(&format!("{x},{}\n", x * (4.0 - x) / 2.0));
        }
        parse_points(&text).unwrap()
    }

    #[test]
    fn multi_mode_covers_all_points() {
        let cfg = FitConfig::default();
        let run = run_fit(arch_points(), None, &cfg, FitMode::Multi).unwrap();
        assert!(!run.path.is_empty());
        assert!(run.single.is_none());
        assert!(run.result.dist_max <= cfg.dist_min);
        let first = &run.path.segments()[0];
        let last = &run.path.segments()[run.path.len() - 1];
        assert_eq!(first.start(), Point2::new(0.0, 0.0));
        assert_eq!(last.end(), Point2::new(4.0, 0.0));
    }

    #[test]
    fn single_mode_emits_one_segment() {
        let cfg = FitConfig::default();
        let run = run_fit(arch_points(), None, &cfg, FitMode::Single).unwrap();
        assert_eq!(run.path.len(), 1);
        assert_eq!(run.path.segments()[0].point_num, 21);
        let single = run.single.unwrap();
        assert_ne!(single.stop, StopReason::Degenerate);
        assert_eq!(single.result, run.result);
    }

    #[test]
    fn fit_errors_carry_exit_code() {
        let geom = Geometry {
            v0: Point2::new(0.0, 0.0),
            t1: Point2::zeros(),
            t2: Point2::zeros(),
            v3: Point2::new(4.0, 0.0),
        };
        let err = run_fit(arch_points(), Some(geom), &FitConfig::default(), FitMode::Single).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
