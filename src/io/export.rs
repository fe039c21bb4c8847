//! CSV exports: sampled path points and raw point lists.
//!
//! The export is meant to be easy to consume in spreadsheets or plotting scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;

use crate::bezier::Path;
use crate::domain::Point2;
use crate::error::AppError;

/// Sample `path` at `count` locations and write `index,x,y` rows.
pub fn write_samples_csv(dest: &FsPath, path: &Path, count: usize) -> Result<usize, AppError> {
    let file = File::create(dest)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", dest.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "index,x,y").map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let samples = path.sample(count);
    for (i, p) in samples.iter().enumerate() {
        writeln!(out, "{i},{:.10},{:.10}", p.x, p.y)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(samples.len())
}

/// Write a point list as `x,y` rows that `load_points` reads back exactly.
pub fn write_points_csv(dest: &FsPath, points: &[Point2]) -> Result<(), AppError> {
    let file = File::create(dest)
        .map_err(|e| AppError::new(2, format!("Failed to create points CSV '{}': {e}", dest.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,y").map_err(|e| AppError::new(2, format!("Failed to write points CSV header: {e}")))?;
    for p in points {
        writeln!(out, "{},{}", p.x, p.y).map_err(|e| AppError::new(2, format!("Failed to write points CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush points CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::Segment;

    #[test]
    fn writes_header_and_rows() {
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
        let dest = std::env::temp_dir().join(format!("cbfit_samples_{}.csv", std::process::id()));
        let written = write_samples_csv(&dest, &path, 4).unwrap();
        let text = std::fs::read_to_string(&dest).unwrap();
        std::fs::remove_file(&dest).ok();

        assert_eq!(written, 4);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "index,x,y");
        assert_eq!(lines[1], "0,0.0000000000,0.0000000000");
        assert_eq!(lines[4], "3,3.0000000000,0.0000000000");
    }

    #[test]
    fn point_list_reloads_unchanged() {
        let points = vec![Point2::new(0.0, -1.25), Point2::new(0.1, 1.0 / 3.0), Point2::new(2.0, 1e-9)];
        let dest = std::env::temp_dir().join(format!("cbfit_points_{}.csv", std::process::id()));
        write_points_csv(&dest, &points).unwrap();
        let data = crate::io::load_points(&dest).unwrap();
        std::fs::remove_file(&dest).ok();

        assert_eq!(data.points, points);
        assert!(data.row_errors.is_empty());
    }
}
