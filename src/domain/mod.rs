//! Domain types used throughout the fitting engine.
//!
//! This module defines:
//!
//! - geometry inputs (`Point2`, `Geometry`)
//! - fitting parameters (`FitConfig`)
//! - fit outputs (`FitResult`, `SingleFit`, `StopReason`, `PathFile`)

pub mod types;

pub use types::*;
