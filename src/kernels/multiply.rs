//! Matrix product and repeated multiplication.

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::threaded::{Executor, Occupancy};

/// `a × b` into a freshly allocated matrix.
///
/// Each output row is one unit of work; cell `(i, j)` accumulates
/// `a[i][k] * b[k][j]` for ascending `k`, so every strategy produces the
/// same bits.
pub fn multiply(exec: &Executor, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    a.check_same_order(b)?;
    Ok(product(exec, a, b))
}

/// `m` raised to the `exponent`-th power by `exponent - 1` successive
/// multiplications against the original operand.
///
/// `exponent == 1` returns a copy and `exponent == 0` the identity.
pub fn power(exec: &Executor, m: &Matrix, exponent: u32) -> Matrix {
    if exponent == 0 {
        return Matrix::identity(m.order());
    }
    let mut result = m.clone();
    for _ in 1..exponent {
        result = product(exec, &result, m);
    }
    result
}

// Callers guarantee equal orders.
fn product(exec: &Executor, a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.order();
    let rhs = b.as_slice();
    let mut c = Matrix::zeros(n);

    exec.for_each_row(c.as_mut_slice(), n, Occupancy::Full, |i, out| {
        let lhs = a.row(i);
        for (j, cell) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, &l) in lhs.iter().enumerate() {
                sum += l * rhs[k * n + j];
            }
            *cell = sum;
        }
    });
    c
}
