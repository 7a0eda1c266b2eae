//! Parallel arithmetic kernels over [`Matrix`](crate::Matrix).
//!
//! Every kernel takes the run's [`Executor`](crate::Executor) and splits its
//! output by rows; no two work units ever write the same cell.
//!
//! Available kernels:
//! - `elementwise`: add (allocating and in place), scalar multiply
//! - `multiply`: matrix product, power

pub mod elementwise;
pub mod multiply;

pub use elementwise::{add, add_assign, scale};
pub use multiply::{multiply, power};
