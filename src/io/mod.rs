//! Input/output helpers.
//!
//! - point-list ingest + validation (`ingest`)
//! - sampled-path CSV export (`export`)
//! - fitted-path JSON read/write (`path`)

pub mod export;
pub mod ingest;
pub mod path;

pub use export::*;
pub use ingest::*;
pub use path::*;
