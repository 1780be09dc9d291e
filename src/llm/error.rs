use std::error::Error;
use std::fmt;

/// Errors raised while building or running the model
#[derive(Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Two operands of a matrix operation have incompatible dimensions
    ShapeMismatch {
        /// Name of the failing operation
        op: &'static str,
        /// Shape of the left operand as (rows, cols)
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols)
        right: (usize, usize),
    },
    /// A slice or lookup reached outside a matrix
    OutOfBounds(String),
    /// Hyperparameters that cannot describe a model
    InvalidConfig(String),
    /// The tokenizer produced an index outside the embedding table
    TokenOutOfRange { token: usize, vocab_size: usize },
    /// The tokenized input is longer than the positional table
    SequenceTooLong { len: usize, max: usize },
    /// The input produced no tokens at all
    EmptySequence,
    /// Tokenizer-specific failure
    Tokenizer(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LlmError::ShapeMismatch { op, left, right } => write!(
                f,
                "Incompatible shapes for {}: {}x{} and {}x{}",
                op, left.0, left.1, right.0, right.1
            ),
            LlmError::OutOfBounds(msg) => write!(f, "Index out of bounds: {}", msg),
            LlmError::InvalidConfig(msg) => write!(f, "Invalid model configuration: {}", msg),
            LlmError::TokenOutOfRange { token, vocab_size } => write!(
                f,
                "Token index {} is outside the vocabulary (size {})",
                token, vocab_size
            ),
            LlmError::SequenceTooLong { len, max } => write!(
                f,
                "Sequence of {} tokens exceeds the maximum length of {}",
                len, max
            ),
            LlmError::EmptySequence => write!(f, "Input text produced no tokens"),
            LlmError::Tokenizer(msg) => write!(f, "Tokenizer error: {}", msg),
        }
    }
}

impl Error for LlmError {}

/// ndarray reports buffer/shape disagreements when wrapping raw slices
impl From<ndarray::ShapeError> for LlmError {
    fn from(err: ndarray::ShapeError) -> Self {
        LlmError::OutOfBounds(err.to_string())
    }
}
