//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - ingests point lists
//! - runs the fitter
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SynthArgs, TangentArgs};
use crate::data::{SynthSpec, synthesize};
use crate::domain::Geometry;
use crate::error::AppError;

pub mod pipeline;

use pipeline::FitMode;

/// Entry point for the `cbfit` binary.
pub fn run() -> Result<(), AppError> {
    // `CBFIT_*` defaults may live in a local `.env`; a missing file is fine.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Synth(args) => handle_synth(args),
        Command::Tangent(args) => handle_tangent(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = args.params.to_config();
    let geometry = Geometry::from_parts(args.geometry.v0, args.geometry.t1, args.geometry.t2, args.geometry.v3)?;
    let mode = if args.single { FitMode::Single } else { FitMode::Multi };

    let ingest = crate::io::load_points(&args.input)?;
    for row in &ingest.row_errors {
        eprintln!("warning: line {}: {}", row.line, row.message);
    }

    let run = pipeline::run_fit(ingest, geometry, &config, mode)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &run.ingest.stats,
            run.ingest.row_errors.len(),
            &config,
            &run.result,
            run.single.as_ref(),
        )
    );
    println!("{}", crate::report::format_segments(&run.path));

    if args.plot {
        println!(
            "{}",
            crate::plot::render_ascii_plot(&run.ingest.points, &run.path, args.width, args.height)
        );
    }

    // Optional exports.
    if let Some(dest) = &args.svg {
        crate::plot::write_svg_plot(dest, &run.ingest.points, &run.path, (800, 600))?;
    }
    if let Some(dest) = &args.export_path {
        let file = crate::io::path_file(&run.path, &run.result, &config);
        crate::io::write_path_json(dest, &file)?;
    }
    if let Some(dest) = &args.export_samples {
        let count = run.ingest.points.len() * args.samples_per_point.max(1);
        let written = crate::io::write_samples_csv(dest, &run.path, count)?;
        if config.verbose >= 1 {
            eprintln!("wrote {written} path samples to {}", dest.display());
        }
    }

    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let spec = SynthSpec {
        geometry: Geometry {
            v0: args.v0,
            t1: args.t1,
            t2: args.t2,
            v3: args.v3,
        },
        alpha: args.alpha,
        count: args.count,
        warp: args.warp,
        noise: args.noise,
        seed: args.seed,
    };
    let points = synthesize(&spec)?;
    crate::io::write_points_csv(&args.output, &points)?;
    println!("Wrote {} points to {}", points.len(), args.output.display());
    Ok(())
}

fn handle_tangent(args: TangentArgs) -> Result<(), AppError> {
    let ingest = crate::io::load_points(&args.input)?;
    let last = ingest.points.len() - 1;
    let hi = args.hi.unwrap_or(last);
    let tvt = crate::fit::find_tvt(&ingest.points, args.lo, hi, args.at, args.one_sided)?;
    // `find_tvt` has already checked that `lo + at` stays inside the span.
    print!("{}", crate::report::format_tvt(&tvt, args.lo.saturating_add(args.at), args.one_sided));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_path_json(&args.path)?;
    let points = match &args.points {
        Some(src) => crate::io::load_points(src)?.points,
        None => Vec::new(),
    };

    let plot = crate::plot::render_ascii_plot(&points, &file.path, args.width, args.height);
    println!("{plot}");

    if let Some(dest) = &args.svg {
        crate::plot::write_svg_plot(dest, &points, &file.path, (800, 600))?;
    }
    Ok(())
}
