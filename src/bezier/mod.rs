//! Cubic Bezier segments and the paths built from them.
//!
//! - `segment`: one cubic, evaluation of its value and derivatives
//! - `path`: ordered, growable chain of segments

pub mod path;
pub mod segment;

pub use path::*;
pub use segment::*;
