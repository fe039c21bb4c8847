//! Mathematical kernels: Bernstein basis weights and the alpha least-squares solve.

pub mod alpha;
pub mod basis;

pub use alpha::*;
pub use basis::*;
