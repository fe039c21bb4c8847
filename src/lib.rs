//! `cbfit` library crate: least-squares cubic Bezier fitting of ordered 2D points.
//!
//! The binary (`cbfit`) is a thin wrapper around this library so that:
//!
//! - the fitting engine is testable without spawning processes
//! - the engine (`fit`, `bezier`) can be embedded without the CLI layers
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod bezier;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
