//! Reporting utilities: formatted terminal output for fits and tangent probes.

pub mod format;

pub use format::*;
