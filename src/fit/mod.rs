//! Curve fitting engine.
//!
//! Responsibilities:
//!
//! - Newton reparameterization of data points (`reparam`)
//! - worst-point distance evaluation (`distance`)
//! - iterative single-segment fitting (`single`)
//! - adaptive multi-segment subdivision (`multi`)
//! - finite-difference tangent estimates (`tangent`)

pub mod distance;
pub mod multi;
pub mod reparam;
pub mod single;
pub mod tangent;

pub use distance::*;
pub use multi::*;
pub use reparam::*;
pub use single::*;
pub use tangent::*;
