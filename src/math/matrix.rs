use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};

use crate::error::{NetError, NetResult};

/// Dense row-major matrix of `f64`.
///
/// Columns are examples and rows are features/units everywhere in this crate,
/// so a batch of `m` inputs with `n` features is an `n × m` matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Entries drawn from N(0, 1) and multiplied by `scale`.
    ///
    /// Values are drawn row by row, so the same RNG state always yields the
    /// same matrix.
    pub fn standard_normal<R: Rng + ?Sized>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                let sample: f64 = rng.sample(StandardNormal);
                res.data[i][j] = sample * scale;
            }
        }
        res
    }

    /// Builds a matrix from rows, rejecting ragged input.
    pub fn from_data(data: Vec<Vec<f64>>) -> NetResult<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NetError::shape("Matrix::from_data", (rows, cols), (rows, bad.len())));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// A `1 × n` matrix holding `values`.
    pub fn row_vector(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Fails with `ShapeMismatch` unless the matrix is exactly `expected`.
    pub fn ensure_shape(&self, expected: (usize, usize), context: &'static str) -> NetResult<()> {
        if self.shape() != expected {
            return Err(NetError::shape(context, expected, self.shape()));
        }
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> NetResult<Matrix> {
        if self.cols != rhs.rows {
            return Err(NetError::shape("Matrix::dot", (self.cols, rhs.cols), rhs.shape()));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            let lhs_row = &self.data[i];
            for (k, &a) in lhs_row.iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                let rhs_row = &rhs.data[k];
                for (out, &b) in res.data[i].iter_mut().zip(rhs_row.iter()) {
                    *out += a * b;
                }
            }
        }

        Ok(res)
    }

    /// Adds a `rows × 1` column vector to every column.
    pub fn add_column(&self, column: &Matrix) -> NetResult<Matrix> {
        column.ensure_shape((self.rows, 1), "Matrix::add_column")?;
        let data = self.data.iter().zip(column.data.iter())
            .map(|(row, bias)| row.iter().map(|x| x + bias[0]).collect())
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// Element-wise `self - rhs`.
    pub fn sub(&self, rhs: &Matrix) -> NetResult<Matrix> {
        self.zip_with(rhs, "Matrix::sub", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Matrix) -> NetResult<Matrix> {
        self.zip_with(rhs, "Matrix::hadamard", |a, b| a * b)
    }

    /// Sums each row across its columns, giving a `rows × 1` column vector.
    pub fn sum_columns(&self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: 1,
            data: self.data.iter().map(|row| vec![row.iter().sum()]).collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// In-place `self -= factor * rhs`.
    pub fn sub_scaled_assign(&mut self, rhs: &Matrix, factor: f64) -> NetResult<()> {
        rhs.ensure_shape(self.shape(), "Matrix::sub_scaled_assign")?;
        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, g) in row.iter_mut().zip(rhs_row.iter()) {
                *x -= factor * g;
            }
        }
        Ok(())
    }

    /// All entries in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|row| row.iter().copied())
    }

    /// Largest entry, or `None` for an empty matrix.
    pub fn max(&self) -> Option<f64> {
        self.values().fold(None, |acc, x| match acc {
            Some(m) if m >= x => Some(m),
            _ => Some(x),
        })
    }

    fn zip_with<F>(&self, rhs: &Matrix, context: &'static str, op: F) -> NetResult<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        rhs.ensure_shape(self.shape(), context)?;
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(&a, &b)| op(a, b)).collect()
            })
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
