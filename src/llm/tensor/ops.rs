use ndarray::Axis;
use rand::Rng;

use super::Matrix;
use crate::llm::error::LlmError;

/// Create a `rows x cols` matrix with values drawn uniformly from [-1, 1)
///
/// # Arguments
/// * `rows` - Number of rows
/// * `cols` - Number of columns
/// * `rng` - Random source; pass a seeded generator for reproducible weights
pub fn initialize<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    let mut m = Matrix::zeros(rows, cols);
    for value in m.data_mut() {
        *value = rng.random_range(-1.0f32..1.0);
    }
    m
}

/// Matrix multiplication of two matrices
///
/// # Arguments
/// * `a` - Left matrix with shape (m, k)
/// * `b` - Right matrix with shape (k, n)
///
/// # Returns
/// * `Result<Matrix, LlmError>` - Product with shape (m, n)
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, LlmError> {
    if a.cols() != b.rows() {
        return Err(LlmError::ShapeMismatch {
            op: "matmul",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let result = a.view()?.dot(&b.view()?);
    Matrix::from_vec(a.rows(), b.cols(), result.iter().copied().collect())
}

/// Add two matrices element-wise
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, LlmError> {
    if a.shape() != b.shape() {
        return Err(LlmError::ShapeMismatch {
            op: "add",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let data = a.data().iter().zip(b.data()).map(|(x, y)| x + y).collect();
    Matrix::from_vec(a.rows(), a.cols(), data)
}

/// Swap rows and columns
pub fn transpose(m: &Matrix) -> Result<Matrix, LlmError> {
    // Iterating the transposed view walks it in logical (row-major) order
    let data = m.view()?.t().iter().copied().collect();
    Matrix::from_vec(m.cols(), m.rows(), data)
}

/// Extract the submatrix covering rows `[row_start, row_end)` and columns
/// `[col_start, col_end)`
pub fn slice(
    m: &Matrix,
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
) -> Result<Matrix, LlmError> {
    if row_start > row_end || row_end > m.rows() || col_start > col_end || col_end > m.cols() {
        return Err(LlmError::OutOfBounds(format!(
            "slice rows {}..{} cols {}..{} of a {}x{} matrix",
            row_start,
            row_end,
            col_start,
            col_end,
            m.rows(),
            m.cols()
        )));
    }

    let width = col_end - col_start;
    let mut data = Vec::with_capacity((row_end - row_start) * width);
    for row in m.iter_rows().skip(row_start).take(row_end - row_start) {
        data.extend_from_slice(&row[col_start..col_end]);
    }
    Matrix::from_vec(row_end - row_start, width, data)
}

/// Apply `f` independently to every entry
pub fn apply_function<F>(m: &Matrix, f: F) -> Matrix
where
    F: Fn(f32) -> f32,
{
    let mut result = m.clone();
    for value in result.data_mut() {
        *value = f(*value);
    }
    result
}

/// Multiply every entry by `factor`
pub fn scale(m: &Matrix, factor: f32) -> Matrix {
    apply_function(m, |x| x * factor)
}

/// Row-wise softmax; each row becomes an independent probability distribution
pub fn softmax(m: &Matrix) -> Result<Matrix, LlmError> {
    let mut result = m.clone();
    {
        let mut view = result.view_mut()?;
        for mut row in view.axis_iter_mut(Axis(0)) {
            // Subtract the row max so exp() cannot overflow
            let max_val = row.fold(f32::NEG_INFINITY, |max, &val| max.max(val));
            row.mapv_inplace(|x| (x - max_val).exp());
            let sum = row.sum();
            row.mapv_inplace(|x| x / sum);
        }
    }
    Ok(result)
}

/// Concatenate matrices side by side; all parts must have the same row count
pub fn concat_columns(parts: &[Matrix]) -> Result<Matrix, LlmError> {
    let rows = parts.first().map_or(0, Matrix::rows);
    if let Some(bad) = parts.iter().find(|p| p.rows() != rows) {
        return Err(LlmError::ShapeMismatch {
            op: "concat_columns",
            left: parts[0].shape(),
            right: bad.shape(),
        });
    }

    let cols: usize = parts.iter().map(Matrix::cols).sum();
    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for part in parts {
            if let Some(row) = part.row(r) {
                data.extend_from_slice(row);
            }
        }
    }
    Matrix::from_vec(rows, cols, data)
}
