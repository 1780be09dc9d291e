use tracing::debug;

use super::strategies::{ByteTokenizer, WordTokenizer};
use super::strategy::TokenizerStrategy;
use super::types::TokenizerType;
use crate::llm::error::LlmError;

/// A tokenizer that converts text to token indices
pub struct Tokenizer {
    strategy: Box<dyn TokenizerStrategy>,
    tokenizer_type: TokenizerType,
}

impl Tokenizer {
    /// Creates a new tokenizer of the given type over a vocabulary of `vocab_size`
    pub fn new(tokenizer_type: TokenizerType, vocab_size: usize) -> Result<Self, LlmError> {
        // Create the appropriate strategy based on type
        let strategy: Box<dyn TokenizerStrategy> = match tokenizer_type {
            TokenizerType::Word => Box::new(WordTokenizer::new(vocab_size)?),
            TokenizerType::Byte => Box::new(ByteTokenizer::new(vocab_size)?),
        };
        debug!("Using {} tokenizer over {} entries", strategy.name(), vocab_size);

        Ok(Self { strategy, tokenizer_type })
    }

    // Delegate to the strategy
    pub fn encode(&self, text: &str) -> Result<Vec<usize>, LlmError> {
        self.strategy.encode(text)
    }

    pub fn vocab_size(&self) -> usize {
        self.strategy.vocab_size()
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("type", &self.tokenizer_type)
            .field("vocab_size", &self.vocab_size())
            .finish()
    }
}
