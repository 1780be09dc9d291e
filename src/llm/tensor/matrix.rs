use std::fmt::{self, Debug};

use ndarray::{ArrayView2, ArrayViewMut2};
use serde::Serialize;

use crate::llm::error::LlmError;

/// A dense, row-major 2-D matrix of `f32` values
#[derive(Clone, PartialEq, Serialize)]
pub struct Matrix {
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
    /// The raw data as a contiguous array of `rows * cols` values
    data: Vec<f32>,
}

impl Matrix {
    /// Wrap a flat buffer, checking that it holds exactly `rows * cols` values
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, LlmError> {
        if data.len() != rows * cols {
            return Err(LlmError::OutOfBounds(format!(
                "buffer of {} values cannot form a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows, rejecting ragged input
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, LlmError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LlmError::ShapeMismatch {
                    op: "from_rows",
                    left: (1, cols),
                    right: (i, row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    /// Create a new matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Square identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get a reference to the matrix's raw data
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a mutable reference to the matrix's raw data
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at (row, col), or `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Overwrite the value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), LlmError> {
        if row >= self.rows || col >= self.cols {
            return Err(LlmError::OutOfBounds(format!(
                "({}, {}) in a {}x{} matrix",
                row, col, self.rows, self.cols
            )));
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Borrow one row as a slice
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index < self.rows {
            Some(&self.data[index * self.cols..(index + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.rows).map(move |i| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Borrow the matrix as an ndarray view
    pub fn view(&self) -> Result<ArrayView2<'_, f32>, LlmError> {
        Ok(ArrayView2::from_shape((self.rows, self.cols), &self.data)?)
    }

    /// Borrow the matrix as a mutable ndarray view
    pub fn view_mut(&mut self) -> Result<ArrayViewMut2<'_, f32>, LlmError> {
        Ok(ArrayViewMut2::from_shape((self.rows, self.cols), &mut self.data)?)
    }

    /// Largest absolute elementwise difference, `None` when shapes differ
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f32> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f32::max),
        )
    }
}

impl Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.len() <= 16 {
            write!(f, "Matrix {{ shape: {:?}, data: {:?} }}", self.shape(), self.data)
        } else {
            write!(f, "Matrix {{ shape: {:?}, data: truncated }}", self.shape())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Matrix::from_vec(2, 3, vec![0.0; 5]).is_err());
        assert!(Matrix::from_vec(2, 3, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Matrix::from_rows(&ragged),
            Err(LlmError::ShapeMismatch { op: "from_rows", .. })
        ));
    }

    #[test]
    fn test_row_access() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(m.row(3), None);
        assert_eq!(m.get(2, 1), Some(6.0));
        assert_eq!(m.get(2, 2), None);

        let rows: Vec<&[f32]> = m.iter_rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[5.0, 6.0]);
    }

    #[test]
    fn test_iter_rows_zero_width() {
        let m = Matrix::zeros(3, 0);
        assert_eq!(m.iter_rows().count(), 3);
        assert!(m.iter_rows().all(|r| r.is_empty()));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut m = Matrix::zeros(2, 2);
        assert!(m.set(1, 1, 4.0).is_ok());
        assert_eq!(m.get(1, 1), Some(4.0));
        assert!(m.set(2, 0, 1.0).is_err());
    }
}
