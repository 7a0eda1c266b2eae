//! The benchmarked expression `A = B·C³ + Tr(C)·I + C + Tr(B)·E`.
//!
//! `I` is the identity and `E` the all-ones matrix of the operands' order.
//! The steps form a dependency chain, so they run one after another; only
//! the kernels inside each step are parallel.

use log::debug;

use crate::error::MatrixError;
use crate::kernels::{add_assign, multiply, power, scale};
use crate::matrix::Matrix;
use crate::threaded::Executor;

/// Evaluates the expression for `b` and `c` under the executor's strategy.
///
/// ```
/// use matexpr::{Executor, Matrix, Strategy, evaluate};
///
/// let exec = Executor::new(Strategy::Simple, 2).unwrap();
/// let b = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let c = Matrix::identity(2);
///
/// let a = evaluate(&exec, &b, &c).unwrap();
/// assert_eq!(a.as_slice(), &[9.0, 7.0, 8.0, 12.0]);
/// ```
pub fn evaluate(exec: &Executor, b: &Matrix, c: &Matrix) -> Result<Matrix, MatrixError> {
    b.check_same_order(c)?;
    let n = b.order();

    debug!("step 1/5: C^3");
    let c3 = power(exec, c, 3);

    debug!("step 2/5: B * C^3");
    let mut a = multiply(exec, b, &c3)?;

    debug!("step 3/5: + Tr(C) * I");
    add_assign(exec, &mut a, &scale(exec, &Matrix::identity(n), c.trace()))?;

    debug!("step 4/5: + C");
    add_assign(exec, &mut a, c)?;

    debug!("step 5/5: + Tr(B) * E");
    add_assign(exec, &mut a, &scale(exec, &Matrix::filled(n, 1.0), b.trace()))?;

    Ok(a)
}
