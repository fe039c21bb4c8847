//! Read/write fitted-path JSON files.
//!
//! Path JSON is the "portable" representation of a fit:
//! - the segments (control points + point counts)
//! - the configuration and diagnostics of the run that produced them
//!
//! The schema is defined by `domain::PathFile`.

use std::fs::File;
use std::path::Path as FsPath;

use chrono::Utc;

use crate::bezier::Path;
use crate::domain::{FitConfig, FitResult, PathFile};
use crate::error::AppError;

/// Bundle a fitted path with its run metadata.
pub fn path_file(path: &Path, result: &FitResult, config: &FitConfig) -> PathFile {
    PathFile {
        tool: "cbfit".to_string(),
        generated: Utc::now(),
        config: config.clone(),
        result: result.clone(),
        path: path.clone(),
    }
}

/// Write a path JSON file.
pub fn write_path_json(dest: &FsPath, file: &PathFile) -> Result<(), AppError> {
    let out = File::create(dest)
        .map_err(|e| AppError::new(2, format!("Failed to create path JSON '{}': {e}", dest.display())))?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write path JSON: {e}")))?;
    Ok(())
}

/// Read a path JSON file.
pub fn read_path_json(src: &FsPath) -> Result<PathFile, AppError> {
    let file = File::open(src)
        .map_err(|e| AppError::new(2, format!("Failed to open path JSON '{}': {e}", src.display())))?;
    let parsed: PathFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid path JSON: {e}")))?;
    Ok(parsed)
}
