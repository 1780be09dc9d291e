// Declare submodules
pub mod error;
pub mod inference;
pub mod model;
pub mod tensor;
pub mod tokenizer;

// Re-export types for external use
pub use error::LlmError;
pub use model::Model;
pub use tensor::Matrix;
