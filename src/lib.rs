//! A minimal attention-only Transformer forward pass: token embedding,
//! sinusoidal positional encoding and one multi-head self-attention layer on
//! top of a small dense-matrix library.

pub mod cli;
pub mod config;
pub mod llm;

pub use config::{ModelConfig, Settings};
pub use llm::{LlmError, Matrix, Model};
