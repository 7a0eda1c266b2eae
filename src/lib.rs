//! Parallel dense-matrix expression benchmark.
//!
//! Evaluates `A = B·C³ + Tr(C)·I + C + Tr(B)·E` over two square matrices
//! and times it. The interesting part is how each kernel spreads its rows
//! over a shared worker pool: the same expression can run data-parallel,
//! as a group of tasks joined at a barrier, or as recursive fork-join
//! sections. Every strategy produces bit-identical results.
//!
//! ## Usage
//!
//! ```
//! use matexpr::{Executor, Matrix, Strategy, evaluate};
//!
//! let exec = Executor::new(Strategy::Tasks, 2).unwrap();
//! let b = Matrix::filled(1, 2.0);
//! let c = Matrix::filled(1, 3.0);
//!
//! // 2·27 + 3 + 3 + 2
//! assert_eq!(evaluate(&exec, &b, &c).unwrap()[(0, 0)], 62.0);
//! ```
//!
//! Kernels can be called directly too:
//!
//! ```
//! use matexpr::{Executor, Matrix, Strategy, multiply, power};
//!
//! let exec = Executor::new(Strategy::Simple, 2).unwrap();
//! let i = Matrix::identity(8);
//! let m = Matrix::filled(8, 0.5);
//!
//! assert_eq!(multiply(&exec, &i, &m).unwrap(), m);
//! assert_eq!(power(&exec, &i, 3), i);
//! ```
//!
//! ## What's inside
//!
//! - Row-major square matrix with a naive reference multiply
//! - Element-wise and product kernels sharing one row dispatcher
//! - Three scheduling strategies over a single rayon pool
//! - A wait-group barrier for the task-based strategy
//! - The `matexpr` driver binary and a `sweep` benchmark binary

pub mod cli;
pub mod driver;
pub mod error;
pub mod expression;
pub mod kernels;
pub mod matrix;
pub mod sweep;
pub mod threaded;

pub use error::{MatrixError, RunError};
pub use expression::evaluate;
pub use kernels::{add, add_assign, multiply, power, scale};
pub use matrix::Matrix;
pub use matrix::naive::matmul_naive_ijk;
pub use threaded::{Executor, Occupancy, Strategy, TaskGroup};
