//! Point-list ingest.
//!
//! This module turns a text file of 2D coordinates into a clean, ordered
//! `Vec<Point2>` that is safe to fit.
//!
//! Accepted layouts:
//! - comma-separated or whitespace-separated (spaces/tabs) columns
//! - an optional header row (`x,y` selects columns by name; otherwise the
//!   first two columns are used)
//! - `#` comment lines
//!
//! Rows that cannot be parsed are skipped and reported with their line
//! number; the remaining rows keep their file order.

use std::path::Path;

use crate::domain::{Point2, PointStats};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: points in file order + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: Vec<Point2>,
    pub stats: PointStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a point list from disk.
pub fn load_points(path: &Path) -> Result<IngestedPoints, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to open points file '{}': {e}", path.display())))?;
    parse_points(&text)
}

/// Parse a point list from text (see module docs for the accepted layouts).
pub fn parse_points(text: &str) -> Result<IngestedPoints, AppError> {
    let delimiter = detect_delimiter(text);
    // Whitespace layouts may mix tabs and spaces; fold them into one separator.
    let folded;
    let input = if delimiter == b' ' {
        folded = text.replace('\t', " ");
        folded.as_str()
    } else {
        text
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .delimiter(delimiter)
        .from_reader(input.as_bytes());

    let mut columns = (0usize, 1usize);
    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut first_record = true;

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(idx + 1);
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 1);

        // Runs of spaces produce empty fields; drop them.
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }

        if first_record {
            first_record = false;
            if fields.iter().any(|f| f.parse::<f64>().is_err()) {
                columns = header_columns(&fields);
                continue;
            }
        }

        rows_read += 1;
        match parse_row(&fields, columns) {
            Ok(p) => points.push(p),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let Some(stats) = PointStats::from_points(&points).filter(|s| s.n_points >= 2) else {
        return Err(AppError::new(
            3,
            format!(
                "Need at least 2 valid points to fit; got {} ({} rows skipped).",
                points.len(),
                row_errors.len()
            ),
        ));
    };

    Ok(IngestedPoints {
        points,
        stats,
        row_errors,
        rows_read,
    })
}

fn detect_delimiter(text: &str) -> u8 {
    let has_comma = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('#'))
        .any(|l| l.contains(','));
    if has_comma { b',' } else { b' ' }
}

fn header_columns(fields: &[&str]) -> (usize, usize) {
    let names: Vec<String> = fields.iter().map(|f| f.trim().to_ascii_lowercase()).collect();
    let x = names.iter().position(|n| n == "x").unwrap_or(0);
    let y = names.iter().position(|n| n == "y").unwrap_or(if x == 1 { 0 } else { 1 });
    (x, y)
}

fn parse_row(fields: &[&str], (xi, yi): (usize, usize)) -> Result<Point2, String> {
    let get = |i: usize, name: &str| -> Result<f64, String> {
        let raw = fields
            .get(i)
            .ok_or_else(|| format!("missing {name} column (row has {} fields)", fields.len()))?;
        let v: f64 = raw.parse().map_err(|_| format!("invalid {name} value '{raw}'"))?;
        if !v.is_finite() {
            return Err(format!("non-finite {name} value '{raw}'"));
        }
        Ok(v)
    };
    Ok(Point2::new(get(xi, "x")?, get(yi, "y")?))
}
