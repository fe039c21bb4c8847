//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - data points: `o`
//! - fitted path: `-` line
//! - segment joints: `+`

use crate::bezier::Path;
use crate::domain::Point2;

/// Samples drawn per plot column; keeps tight bends connected.
const SAMPLES_PER_COLUMN: usize = 4;

/// Render data points and a fitted path on one grid.
pub fn render_ascii_plot(points: &[Point2], path: &Path, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let curve = path.sample(width * SAMPLES_PER_COLUMN);
    let joints = path.joints();

    let all = points.iter().chain(curve.iter()).chain(joints.iter());
    let (x_min, x_max, y_min, y_max) = bounds(all).unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let frame = Frame {
        x_min,
        x_max,
        y_min,
        y_max,
        width,
        height,
    };

    let mut grid = vec![vec![' '; width]; height];

    // Path first so joints and points can overlay it.
    let mut prev = None;
    for p in &curve {
        let cell = frame.cell(*p);
        match prev {
            Some(from) => draw_line(&mut grid, from, cell, '-'),
            None => grid[cell.1][cell.0] = '-',
        }
        prev = Some(cell);
    }
    for p in &joints {
        let (x, y) = frame.cell(*p);
        grid[y][x] = '+';
    }
    for p in points {
        let (x, y) = frame.cell(*p);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}] | segments={}\n",
        path.len()
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
}

impl Frame {
    /// Grid cell `(column, row)` of a point; row 0 is the top.
    fn cell(&self, p: Point2) -> (usize, usize) {
        let u = ((p.x - self.x_min) / (self.x_max - self.x_min)).clamp(0.0, 1.0);
        let v = ((p.y - self.y_min) / (self.y_max - self.y_min)).clamp(0.0, 1.0);
        let x = (u * (self.width as f64 - 1.0)).round() as usize;
        let y = (self.height as f64 - 1.0 - v * (self.height as f64 - 1.0)).round() as usize;
        (x, y)
    }
}

fn bounds<'a>(points: impl Iterator<Item = &'a Point2>) -> Option<(f64, f64, f64, f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    // A flat extent still needs a non-zero span to map into.
    let (x_min, x_max) = widen_flat(x_min, x_max);
    let (y_min, y_max) = widen_flat(y_min, y_max);
    Some((x_min, x_max, y_min, y_max))
}

fn widen_flat(min: f64, max: f64) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 0.5, max + 0.5) }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
