//! Square dense matrix with contiguous row-major storage.

use std::fmt;
use std::io::{self, Write};
use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::error::MatrixError;

/// A square `order × order` matrix of `f64`, stored row-major.
///
/// Every cell is always populated. Cloning duplicates the storage; no matrix
/// ever borrows from another.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    order: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix.
    ///
    /// # Panics
    ///
    /// Panics if `order` is zero.
    pub fn zeros(order: usize) -> Self {
        Self::filled(order, 0.0)
    }

    /// Matrix with every cell set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is zero.
    pub fn filled(order: usize, value: f64) -> Self {
        assert!(order >= 1, "matrix order must be at least 1");
        Self {
            order,
            data: vec![value; order * order],
        }
    }

    /// Identity matrix of the given order.
    ///
    /// # Panics
    ///
    /// Panics if `order` is zero.
    pub fn identity(order: usize) -> Self {
        let mut m = Self::zeros(order);
        m.set_identity();
        m
    }

    /// Wraps a row-major buffer of exactly `order * order` values.
    pub fn from_vec(order: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if order == 0 || data.len() != order * order {
            return Err(MatrixError::BufferLength {
                order,
                len: data.len(),
            });
        }
        Ok(Self { order, data })
    }

    /// Builds a matrix from nested rows; every row must be as long as the
    /// number of rows.
    ///
    /// ```
    /// use matexpr::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.order(), 2);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let order = rows.len();
        if order == 0 {
            return Err(MatrixError::BufferLength { order, len: 0 });
        }
        let mut data = Vec::with_capacity(order * order);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != order {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    order,
                });
            }
            data.extend(values);
        }
        Ok(Self { order, data })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Copies the contents of `other` into `self`, reusing the allocation
    /// where possible.
    pub fn assign(&mut self, other: &Matrix) {
        self.clone_from(other);
    }

    /// Fills every cell with an independent draw from the uniform
    /// distribution on `[0, 1)`.
    pub fn randomize_uniform<R: Rng>(&mut self, rng: &mut R) {
        for cell in &mut self.data {
            *cell = rng.gen_range(0.0..1.0);
        }
    }

    /// Fills every cell with an independent integer drawn from `[1, order]`.
    ///
    /// Used for printed runs so the output can be checked by hand.
    pub fn randomize_bounded_int<R: Rng>(&mut self, rng: &mut R) {
        let order = self.order;
        for cell in &mut self.data {
            *cell = rng.gen_range(1..=order) as f64;
        }
    }

    pub fn set_identity(&mut self) {
        let n = self.order;
        for (idx, cell) in self.data.iter_mut().enumerate() {
            *cell = if idx / n == idx % n { 1.0 } else { 0.0 };
        }
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        (0..self.order).map(|i| self.data[i * self.order + i]).sum()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.order || col >= self.order {
            return None;
        }
        Some(self.data[row * self.order + col])
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.order;
        &self.data[start..start + self.order]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Fails with [`MatrixError::SizeMismatch`] unless both orders agree.
    pub fn check_same_order(&self, other: &Matrix) -> Result<(), MatrixError> {
        if self.order != other.order {
            return Err(MatrixError::SizeMismatch {
                left: self.order,
                right: other.order,
            });
        }
        Ok(())
    }

    /// Writes each row as tab-terminated values followed by a newline.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }

    /// Prints the matrix to standard output.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.order && col < self.order, "index out of bounds");
        &self.data[row * self.order + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.order && col < self.order, "index out of bounds");
        &mut self.data[row * self.order + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.order) {
            for value in row {
                write!(f, "{value}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn constructors_fill_every_cell() {
        let z = Matrix::zeros(3);
        assert!(z.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(z.as_slice().len(), 9);

        let e = Matrix::filled(2, 1.5);
        assert_eq!(e.as_slice(), &[1.5; 4]);
    }

    #[test]
    #[should_panic(expected = "order must be at least 1")]
    fn zero_order_panics() {
        let _ = Matrix::zeros(0);
    }

    #[test]
    fn identity_and_trace() {
        let i = Matrix::identity(4);
        assert_eq!(i.trace(), 4.0);
        assert_eq!(i[(2, 2)], 1.0);
        assert_eq!(i[(2, 1)], 0.0);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: 1,
                len: 1,
                order: 2
            }
        );
        assert!(Matrix::from_rows(Vec::new()).is_err());
        assert!(Matrix::from_vec(2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn random_fills_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut m = Matrix::zeros(16);

        m.randomize_uniform(&mut rng);
        assert!(m.as_slice().iter().all(|&v| (0.0..1.0).contains(&v)));

        m.randomize_bounded_int(&mut rng);
        assert!(
            m.as_slice()
                .iter()
                .all(|&v| v.fract() == 0.0 && (1.0..=16.0).contains(&v))
        );
    }

    #[test]
    fn assign_copies_storage() {
        let src = Matrix::filled(3, 2.0);
        let mut dst = Matrix::zeros(1);
        dst.assign(&src);
        assert_eq!(dst, src);
        dst[(0, 0)] = 9.0;
        assert_eq!(src[(0, 0)], 2.0);
    }

    #[test]
    fn renders_tab_separated_rows() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.5], vec![3.0, 4.0]]).unwrap();
        let mut buf = Vec::new();
        m.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t2.5\t\n3\t4\t\n");
    }
}
