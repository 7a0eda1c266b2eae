//! Concurrency plumbing shared by every kernel.
//!
//! A run picks one [`Strategy`] and one worker pool up front; both live in
//! an [`Executor`] that is passed explicitly into each kernel call.
//!
//! Available strategies:
//! - `simple`: data-parallel, one contiguous block of rows per worker
//! - `tasks`: fine-grained row tasks joined through a [`TaskGroup`] barrier
//! - `sections`: recursive fork-join bisection of the row range

pub mod executor;
pub mod strategy;
pub mod task_group;

pub use executor::{Executor, Occupancy};
pub use strategy::Strategy;
pub use task_group::{TaskGroup, TaskGuard};
