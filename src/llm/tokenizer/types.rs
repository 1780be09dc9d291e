use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm::error::LlmError;

/// Represents the tokenizers supported by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerType {
    /// Regex pre-tokenization, each piece hashed into the vocabulary
    #[default]
    Word,
    /// One token per UTF-8 byte
    Byte,
}

impl fmt::Display for TokenizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerType::Word => write!(f, "word"),
            TokenizerType::Byte => write!(f, "byte"),
        }
    }
}

impl FromStr for TokenizerType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" => Ok(TokenizerType::Word),
            "byte" => Ok(TokenizerType::Byte),
            other => Err(LlmError::Tokenizer(format!(
                "Unknown tokenizer type: {}. Must be one of: word, byte",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for t in [TokenizerType::Word, TokenizerType::Byte] {
            assert_eq!(t.to_string().parse::<TokenizerType>().unwrap(), t);
        }
        assert_eq!("BYTE".parse::<TokenizerType>().unwrap(), TokenizerType::Byte);
        assert!("bpe".parse::<TokenizerType>().is_err());
    }
}
