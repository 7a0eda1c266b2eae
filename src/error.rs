//! Error types.

use thiserror::Error;

/// Failures raised by matrix construction and binary matrix operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Operand orders differ. Raised before any cell is written.
    #[error("matrix sizes do not match: {left}x{left} vs {right}x{right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("buffer of length {len} cannot hold a {order}x{order} matrix")]
    BufferLength { order: usize, len: usize },

    #[error("row {row} has {len} values, expected {order}")]
    NotSquare { row: usize, len: usize, order: usize },
}

/// Failures surfaced by the execution driver.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}
