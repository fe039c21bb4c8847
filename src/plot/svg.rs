//! SVG figure of a fit, rendered with Plotters.
//!
//! The figure carries no text (no font backend is compiled in): the fitted
//! path as a line, data points as dots and segment joints as crosses.

use std::path::Path as FsPath;

use plotters::prelude::*;

use crate::bezier::Path;
use crate::domain::Point2;
use crate::error::AppError;

/// Path samples per segment; plenty for a smooth polyline.
const SAMPLES_PER_SEGMENT: usize = 64;

pub fn write_svg_plot(dest: &FsPath, points: &[Point2], path: &Path, size: (u32, u32)) -> Result<(), AppError> {
    let curve = path.sample(path.len() * SAMPLES_PER_SEGMENT + 1);
    let joints = path.joints();
    let (x_range, y_range) = padded_bounds(points.iter().chain(curve.iter()));

    let plot_err = |e: DrawingAreaErrorKind<std::io::Error>| AppError::new(2, format!("Failed to render SVG: {e}"));

    let root = SVGBackend::new(dest, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    let curve_color = RGBColor(0, 90, 200);
    chart
        .draw_series(LineSeries::new(curve.iter().map(|p| (p.x, p.y)), &curve_color))
        .map_err(plot_err)?;
    chart
        .draw_series(points.iter().map(|p| Circle::new((p.x, p.y), 2, BLACK.filled())))
        .map_err(plot_err)?;
    chart
        .draw_series(joints.iter().map(|p| Cross::new((p.x, p.y), 4, &RED)))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn padded_bounds<'a>(points: impl Iterator<Item = &'a Point2>) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut lo = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut hi = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    if !(lo.x.is_finite() && lo.y.is_finite() && hi.x.is_finite() && hi.y.is_finite()) {
        return (0.0..1.0, 0.0..1.0);
    }
    let pad = |min: f64, max: f64| {
        let span = max - min;
        let pad = if span > 0.0 { span * 0.05 } else { 0.5 };
        (min - pad)..(max + pad)
    };
    (pad(lo.x, hi.x), pad(lo.y, hi.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::Segment;

    #[test]
    fn writes_svg_document() {
        let mut path = Path::new();
        path.append(Segment::new(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 2.0),
                Point2::new(4.0, 0.0),
            ],
            3,
        ));
        let points = [Point2::new(0.0, 0.0), Point2::new(2.0, 1.5), Point2::new(4.0, 0.0)];
        let dest = std::env::temp_dir().join(format!("cbfit_plot_{}.svg", std::process::id()));

        write_svg_plot(&dest, &points, &path, (320, 240)).unwrap();
        let text = std::fs::read_to_string(&dest).unwrap();
        std::fs::remove_file(&dest).ok();

        assert!(text.contains("<svg"));
        assert!(text.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn flat_bounds_are_widened() {
        let pts = [Point2::new(1.0, 2.0), Point2::new(1.0, 2.0)];
        let (x, y) = padded_bounds(pts.iter());
        assert_eq!((x.start, x.end), (0.5, 1.5));
        assert_eq!((y.start, y.end), (1.5, 2.5));
    }
}
