//! Cell-by-cell kernels: addition and scalar multiplication.
//!
//! These are memory-bound, so they run with [`Occupancy::Capped`].

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::threaded::{Executor, Occupancy};

/// `a + b` into a freshly allocated matrix.
pub fn add(exec: &Executor, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    a.check_same_order(b)?;
    let mut sum = a.clone();
    add_rows(exec, &mut sum, b);
    Ok(sum)
}

/// `acc += other`, in place.
///
/// Fails before touching `acc` if the orders differ.
pub fn add_assign(exec: &Executor, acc: &mut Matrix, other: &Matrix) -> Result<(), MatrixError> {
    acc.check_same_order(other)?;
    add_rows(exec, acc, other);
    Ok(())
}

/// `scalar * m` into a freshly allocated matrix.
pub fn scale(exec: &Executor, m: &Matrix, scalar: f64) -> Matrix {
    let n = m.order();
    let mut scaled = Matrix::zeros(n);
    exec.for_each_row(scaled.as_mut_slice(), n, Occupancy::Capped, |i, out| {
        for (dst, &src) in out.iter_mut().zip(m.row(i)) {
            *dst = scalar * src;
        }
    });
    scaled
}

fn add_rows(exec: &Executor, acc: &mut Matrix, other: &Matrix) {
    let n = acc.order();
    exec.for_each_row(acc.as_mut_slice(), n, Occupancy::Capped, |i, out| {
        for (dst, &src) in out.iter_mut().zip(other.row(i)) {
            *dst += src;
        }
    });
}
