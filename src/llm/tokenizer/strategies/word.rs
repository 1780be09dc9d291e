use tracing::trace;

use crate::llm::error::LlmError;
use crate::llm::tokenizer::strategy::TokenizerStrategy;
use crate::llm::tokenizer::utilities::{fnv1a, split};

/// Hashes each pre-tokenized piece into `[0, vocab_size)`.
///
/// There is no learned vocabulary; distinct pieces may collide.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    vocab_size: usize,
}

impl WordTokenizer {
    pub fn new(vocab_size: usize) -> Result<Self, LlmError> {
        if vocab_size == 0 {
            return Err(LlmError::InvalidConfig(
                "word tokenizer needs a vocabulary of at least one entry".to_string(),
            ));
        }
        Ok(Self { vocab_size })
    }
}

impl TokenizerStrategy for WordTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<usize>, LlmError> {
        let tokens: Vec<usize> = split(text)
            .into_iter()
            .map(|piece| (fnv1a(piece.as_bytes()) % self.vocab_size as u64) as usize)
            .collect();
        trace!("Encoded {:?} into {:?}", text, tokens);
        Ok(tokens)
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_piece_same_token() {
        let tok = WordTokenizer::new(30000).unwrap();
        let ids = tok.encode("the cat saw the dog").unwrap();
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], ids[3]);
        assert!(ids.iter().all(|&t| t < 30000));
    }

    #[test]
    fn test_tiny_vocab_stays_in_range() {
        let tok = WordTokenizer::new(3).unwrap();
        let ids = tok.encode("a b c d e f g h").unwrap();
        assert!(ids.iter().all(|&t| t < 3));
    }

    #[test]
    fn test_zero_vocab_rejected() {
        assert!(WordTokenizer::new(0).is_err());
    }
}
