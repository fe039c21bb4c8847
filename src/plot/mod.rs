//! Plot renderers for fitted paths.
//!
//! - `ascii`: deterministic character grid for the terminal
//! - `svg`: vector figure written with Plotters

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
