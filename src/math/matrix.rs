use std::fmt;

use rand::rngs::OsRng;
use rand::Rng;

use crate::error::{NnError, Result};

/// Largest double strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Dense row-major matrix of `f64`.
///
/// The shape is fixed at construction and always at least 1x1. Every
/// operation that combines two matrices checks their shapes first and returns
/// an error without touching either operand when they disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(NnError::InvalidDimensions { rows, cols });
        }
        Ok(Matrix::zeros(rows, cols))
    }

    // Callers guarantee a non-zero shape.
    fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Column matrix (`values.len() x 1`) holding a copy of `values`.
    pub fn from_slice(values: &[f64]) -> Result<Matrix> {
        let mut res = Matrix::new(values.len(), 1)?;
        for (i, &v) in values.iter().enumerate() {
            res.data[i][0] = v;
        }
        Ok(res)
    }

    /// Builds a matrix from row vectors. Every row must have the same,
    /// non-zero length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(NnError::InvalidDimensions { rows, cols });
        }
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NnError::ShapeMismatch {
                expected: (1, cols),
                actual: (1, bad.len()),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Matrix> {
        let mut res = Matrix::new(n, n)?;
        for i in 0..n {
            res.data[i][i] = 1.0;
        }
        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Flattens the matrix row by row.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    /// Fills every element with a uniform draw in `[0, 1)` from the operating
    /// system's cryptographically secure generator.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut OsRng);
    }

    /// Like [`Matrix::randomize`] but draws from `rng`, so callers can supply
    /// a seeded generator.
    ///
    /// Each element is a random `u64` divided by `u64::MAX`. Draws close enough
    /// to `u64::MAX` to round to 1.0 are pulled back below it.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                let draw = rng.gen::<u64>() as f64 / u64::MAX as f64;
                *x = draw.min(BELOW_ONE);
            }
        }
    }

    /// Element-wise `self += other`.
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape(other)?;
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, y) in row.iter_mut().zip(other_row.iter()) {
                *x += y;
            }
        }
        Ok(())
    }

    /// Adds `n` to every element.
    pub fn add_scalar(&mut self, n: f64) {
        self.map_in_place(|x| x + n);
    }

    /// New matrix `a - b`.
    pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.check_same_shape(b)?;
        let mut res = Matrix::zeros(a.rows, a.cols);

        for i in 0..a.rows {
            for j in 0..a.cols {
                res.data[i][j] = a.data[i][j] - b.data[i][j];
            }
        }

        Ok(res)
    }

    /// New `cols x rows` matrix with element `(j, i)` taken from `(i, j)`.
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Matrix product `a · b`. Requires `a.cols() == b.rows()`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols != b.rows {
            return Err(NnError::DimensionMismatch {
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut res = Matrix::zeros(a.rows, b.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..a.cols {
                    sum += a.data[i][k] * b.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Hadamard product, overwriting `self` with `self ⊙ other`.
    ///
    /// This is the form the training pass chains: derivative, then error,
    /// then learning rate, all accumulating into one gradient matrix.
    pub fn hadamard_in_place(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape(other)?;
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, y) in row.iter_mut().zip(other_row.iter()) {
                *x *= y;
            }
        }
        Ok(())
    }

    /// Hadamard product as a new matrix; neither operand changes.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        let mut res = self.clone();
        res.hadamard_in_place(other)?;
        Ok(res)
    }

    /// Multiplies every element by `n`.
    pub fn scale_in_place(&mut self, n: f64) {
        self.map_in_place(|x| x * n);
    }

    pub fn map_in_place<F>(&mut self, functor: F)
    where
        F: Fn(f64) -> f64,
    {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = functor(*x);
            }
        }
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(NnError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix dimension: {} by {}", self.rows, self.cols)
    }
}
