use crate::llm::error::LlmError;
use crate::llm::tokenizer::strategy::TokenizerStrategy;

/// Number of distinct byte values
pub const BYTE_VOCAB: usize = 256;

/// Maps every UTF-8 byte of the input to its own token index
#[derive(Debug, Clone)]
pub struct ByteTokenizer {
    vocab_size: usize,
}

impl ByteTokenizer {
    /// The model vocabulary must have room for all 256 byte values
    pub fn new(vocab_size: usize) -> Result<Self, LlmError> {
        if vocab_size < BYTE_VOCAB {
            return Err(LlmError::InvalidConfig(format!(
                "byte tokenizer needs vocab_size >= {}, got {}",
                BYTE_VOCAB, vocab_size
            )));
        }
        Ok(Self { vocab_size })
    }
}

impl TokenizerStrategy for ByteTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<usize>, LlmError> {
        Ok(text.bytes().map(usize::from).collect())
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn name(&self) -> &'static str {
        "byte"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_utf8_bytes() {
        let tok = ByteTokenizer::new(256).unwrap();
        assert_eq!(tok.encode("Hi").unwrap(), vec![72, 105]);
        // 'é' is two bytes in UTF-8
        assert_eq!(tok.encode("é").unwrap(), vec![0xc3, 0xa9]);
        assert!(tok.encode("").unwrap().is_empty());
    }

    #[test]
    fn test_small_vocab_rejected() {
        assert!(matches!(ByteTokenizer::new(255), Err(LlmError::InvalidConfig(_))));
    }
}
