pub mod matrix;
pub mod ops;

// Re-export the Matrix struct and related items for easy access
pub use matrix::Matrix;
pub use ops::{add, apply_function, concat_columns, initialize, matmul, scale, slice, softmax, transpose};
