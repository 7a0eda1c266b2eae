use super::dense::Matrix;
use crate::error::MatrixError;

/// Naive single-threaded matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple loop. Each cell accumulates its inner
/// product in ascending `k`, which is the same order every parallel kernel
/// uses, so the result is bit-identical to [`crate::multiply`] under any
/// strategy.
///
/// Use this as a correctness baseline, not for performance.
pub fn matmul_naive_ijk(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    a.check_same_order(b)?;
    let n = a.order();
    let (lhs, rhs) = (a.as_slice(), b.as_slice());
    let mut c = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += lhs[i * n + k] * rhs[k * n + j];
            }
            c[i * n + j] = sum;
        }
    }
    Matrix::from_vec(n, c)
}
