//! Formatted terminal output for fit runs.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized (and covered by the tests below)

use crate::bezier::Path;
use crate::domain::{FitConfig, FitResult, Point2, PointStats, SingleFit};
use crate::fit::Tvt;

/// Format the full run summary (point stats + config + fit diagnostics).
pub fn format_run_summary(
    stats: &PointStats,
    skipped_rows: usize,
    config: &FitConfig,
    result: &FitResult,
    single: Option<&SingleFit>,
) -> String {
    let mut out = String::new();

    out.push_str("=== cbfit - cubic Bezier fit ===\n");
    out.push_str(&format!(
        "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}] | polyline length={:.4}\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max, stats.length
    ));
    if skipped_rows > 0 {
        out.push_str(&format!("Skipped rows: {skipped_rows}\n"));
    }
    out.push_str(&format!(
        "Config: eps={} iter_max={} delta={} iota={} alpha_min={} det_min={} nrp_cap={}\n",
        config.dist_min,
        config.iter_max,
        config.delta_min,
        config.dist_scale,
        config.alpha_min,
        config.det_min,
        config.nrp_cap
    ));

    out.push_str("\nFit diagnostics:\n");
    out.push_str(&format!("- time      : {:.3} ms\n", result.elapsed.as_secs_f64() * 1e3));
    out.push_str(&format!("- iterations: {}\n", result.iterations));
    out.push_str(&format!("- delta     : {:.6e}\n", result.delta));
    out.push_str(&format!("- dist max  : {:.6} (@{})\n", result.dist_max, result.dist_max_idx));
    out.push_str(&format!("- det       : {:.6e}\n", result.det));
    if let Some(fit) = single {
        out.push_str(&format!(
            "- alpha     : ({:.6}, {:.6}) stopped by {}\n",
            fit.alpha[0],
            fit.alpha[1],
            fit.stop.label()
        ));
    }

    out
}

/// Format the segment table of a path.
pub fn format_segments(path: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("Segments: {}\n", path.len()));
    out.push_str(
        format!(
            "{:>4} {:>6} {:<24} {:<24} {:<24} {:<24}\n",
            "#", "points", "P0", "P1", "P2", "P3"
        )
        .trim_end(),
    );
    out.push('\n');

    for (i, seg) in path.segments().iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:>6} {:<24} {:<24} {:<24} {:<24}\n",
                i,
                seg.point_num,
                fmt_point(seg.points[0]),
                fmt_point(seg.points[1]),
                fmt_point(seg.points[2]),
                fmt_point(seg.points[3]),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format a tangent estimate.
pub fn format_tvt(tvt: &Tvt, index: usize, one_sided: bool) -> String {
    let mode = if one_sided { "one-sided" } else { "two-sided" };
    let mut out = String::new();
    out.push_str(&format!("TVT at point {index} ({mode}):\n"));
    out.push_str(&format!("- left  : {}\n", fmt_point(tvt.left)));
    out.push_str(&format!("- vertex: {}\n", fmt_point(tvt.vertex)));
    out.push_str(&format!("- right : {}\n", fmt_point(tvt.right)));
    out
}

fn fmt_point(p: Point2) -> String {
    format!("({:.6}, {:.6})", p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::bezier::Segment;

    #[test]
    fn segment_table_layout() {
        let mut path = Path::new();
        path.append(Segment::new(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(3.0, 0.0),
            ],
            4,
        ));
        let txt = format_segments(&path);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Segments: 1");
        assert!(lines[1].starts_with("   # points P0"));
        assert!(lines[2].starts_with("   0      4 (0.000000, 0.000000)"), "got {:?}", lines[2]);
        assert!(lines[2].ends_with("(3.000000, 0.000000)"));
    }

    #[test]
    fn summary_mentions_worst_point() {
        let stats = PointStats::from_points(&[Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)]).unwrap();
        let result = FitResult {
            iterations: 7,
            delta: 1e-4,
            dist_max: 0.25,
            dist_max_idx: 12,
            det: 0.5,
            elapsed: Duration::from_millis(2),
        };
        let txt = format_run_summary(&stats, 1, &FitConfig::default(), &result, None);
        assert!(txt.contains("Points: n=2"));
        assert!(txt.contains("Skipped rows: 1"));
        assert!(txt.contains("- iterations: 7"));
        assert!(txt.contains("- dist max  : 0.250000 (@12)"));
        assert!(txt.contains("- time      : 2.000 ms"));
    }

    #[test]
    fn tvt_lines() {
        let tvt = Tvt {
            left: Point2::new(-1.0, 0.0),
            vertex: Point2::new(2.0, 0.0),
            right: Point2::new(0.0, 1.0),
        };
        let txt = format_tvt(&tvt, 3, true);
        assert_eq!(
            txt,
            "TVT at point 3 (one-sided):\n- left  : (-1.000000, 0.000000)\n- vertex: (2.000000, 0.000000)\n- right : (0.000000, 1.000000)\n"
        );
    }
}
