//! Command-line parsing for the `cbfit` Bezier fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.
//!
//! Every fitting parameter can also be supplied through a `CBFIT_*`
//! environment variable (a `.env` file is loaded first); flags win.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{FitConfig, Point2};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cbfit", version, about = "Cubic Bezier path fitting for sampled 2D points")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a point list with a chain of cubic segments, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Write points sampled from one known segment (for experiments and tests).
    Synth(SynthArgs),
    /// Print the tangent/vertex/tangent estimate at one point of a list.
    Tangent(TangentArgs),
    /// Plot a previously exported path JSON.
    Plot(PlotArgs),
}

/// Fitting parameters shared by every fitting entry point.
#[derive(Debug, Args, Clone)]
pub struct FitParams {
    /// Distance tolerance: every accepted segment stays within this of its points.
    #[arg(long, env = "CBFIT_EPS", default_value_t = 0.01)]
    pub eps: f64,

    /// Iteration cap per segment fit (0 = no cap).
    #[arg(long, env = "CBFIT_ITER_MAX", default_value_t = 12)]
    pub iter_max: u32,

    /// Stop iterating once the mean parameter change is at or below this (0 = unused).
    #[arg(long, env = "CBFIT_DELTA", default_value_t = 0.0005)]
    pub delta: f64,

    /// Stop iterating early once the distance is within `iota * eps`.
    #[arg(long, env = "CBFIT_IOTA", default_value_t = 0.25)]
    pub iota: f64,

    /// Reject fits whose tangent scale is below this fraction of the chain length.
    #[arg(long, env = "CBFIT_ALPHA_MIN", default_value_t = 0.001)]
    pub alpha_min: f64,

    /// Minimum determinant magnitude of the alpha solve.
    #[arg(long, env = "CBFIT_DET_MIN", default_value_t = 1e-6)]
    pub det_min: f64,

    /// Newton steps are capped at `nrp_cap / (n - 1)`.
    #[arg(long, env = "CBFIT_NRP_CAP", default_value_t = 3.0)]
    pub nrp_cap: f64,

    /// Diagnostic verbosity on stderr (1 = per segment, 2 = per iteration).
    #[arg(short = 'v', long, env = "CBFIT_VERBOSE", default_value_t = 0)]
    pub verbose: u8,
}

impl FitParams {
    pub fn to_config(&self) -> FitConfig {
        FitConfig {
            iter_max: self.iter_max,
            delta_min: self.delta,
            dist_min: self.eps,
            dist_scale: self.iota,
            alpha_min: self.alpha_min,
            det_min: self.det_min,
            nrp_cap: self.nrp_cap,
            verbose: self.verbose,
        }
    }
}

/// Optional endpoint geometry: all four or none.
#[derive(Debug, Args, Clone, Default)]
pub struct GeometryArgs {
    /// Start vertex `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub v0: Option<Point2>,

    /// Outgoing tangent at the start `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub t1: Option<Point2>,

    /// Incoming tangent at the end, pointing back into the curve, `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub t2: Option<Point2>,

    /// End vertex `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub v3: Option<Point2>,
}

/// Options for `cbfit fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Point list (CSV or whitespace columns, optional `x,y` header).
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub params: FitParams,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Fit exactly one segment (no subdivision) and report its convergence.
    #[arg(long)]
    pub single: bool,

    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write an SVG figure of points and path.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export the fitted path (segments + config + diagnostics) to JSON.
    #[arg(long = "export-path", value_name = "JSON")]
    pub export_path: Option<PathBuf>,

    /// Export points sampled along the fitted path to CSV.
    #[arg(long = "export-samples", value_name = "CSV")]
    pub export_samples: Option<PathBuf>,

    /// Path samples per input point for `--export-samples`.
    #[arg(long, default_value_t = 100)]
    pub samples_per_point: usize,
}

/// Options for `cbfit synth`.
#[derive(Debug, Parser, Clone)]
pub struct SynthArgs {
    /// Tangent scale factors `a0,a1`.
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    pub alpha: [f64; 2],

    /// Start vertex `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub v0: Point2,

    /// Outgoing tangent at the start `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub t1: Point2,

    /// Incoming tangent at the end `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub t2: Point2,

    /// End vertex `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub v3: Point2,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Sample at `(i / (n - 1))^warp` instead of evenly.
    #[arg(long, default_value_t = 1.0)]
    pub warp: f64,

    /// Gaussian noise (standard deviation) added to interior points.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}

/// Options for `cbfit tangent`.
#[derive(Debug, Parser, Clone)]
pub struct TangentArgs {
    /// Point list.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: PathBuf,

    /// First index of the span.
    #[arg(long, default_value_t = 0)]
    pub lo: usize,

    /// Last index of the span (defaults to the last point).
    #[arg(long)]
    pub hi: Option<usize>,

    /// Offset of the probed point from `lo`.
    #[arg(long, default_value_t = 0)]
    pub at: usize,

    /// Use one-sided differences at the vertex.
    #[arg(long)]
    pub one_sided: bool,
}

/// Options for plotting a saved path.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Path JSON file produced by `cbfit fit --export-path`.
    #[arg(long, value_name = "JSON")]
    pub path: PathBuf,

    /// Overlay the fitted point list.
    #[arg(long, value_name = "FILE")]
    pub points: Option<PathBuf>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also write an SVG figure.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

/// Parse `x,y` into a point.
pub fn parse_point(s: &str) -> Result<Point2, String> {
    parse_pair(s).map(|[x, y]| Point2::new(x, y))
}

/// Parse `a,b` into two finite numbers.
pub fn parse_pair(s: &str) -> Result<[f64; 2], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [a, b] = parts.as_slice() else {
        return Err(format!("expected two comma-separated numbers, got '{s}'"));
    };
    let parse = |v: &str| -> Result<f64, String> {
        let x: f64 = v.parse().map_err(|_| format!("invalid number '{v}'"))?;
        if x.is_finite() { Ok(x) } else { Err(format!("non-finite number '{v}'")) }
    };
    Ok([parse(*a)?, parse(*b)?])
}
