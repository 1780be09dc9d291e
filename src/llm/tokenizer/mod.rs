mod strategy;
pub mod types;
mod tokenizer;
pub mod strategies;
pub mod utilities;

pub use strategy::TokenizerStrategy;
pub use tokenizer::Tokenizer;
pub use types::TokenizerType;
