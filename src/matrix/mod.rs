//! Dense matrix storage and a naive reference implementation.
//!
//! The reference multiply provides a correctness baseline for the
//! parallel kernels.

pub mod dense;
pub mod naive;

pub use dense::Matrix;
