use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::llm::error::LlmError;
use crate::llm::inference::{sinusoidal_encoding, MultiHeadAttention};
use crate::llm::tensor::{self, Matrix};
use crate::llm::tokenizer::Tokenizer;

/// A single-layer, attention-only language model.
///
/// All tables and weights are created in [`Model::new`] and never change
/// afterwards, so forward passes are independent of each other.
#[derive(Debug)]
pub struct Model {
    /// Hyperparameters the model was built with
    config: ModelConfig,
    /// Token embedding table, one row per vocabulary entry
    embedding: Matrix,
    /// Sinusoidal positional encoding table, one row per position
    positional_encoding: Matrix,
    /// The attention layer
    attention: MultiHeadAttention,
    /// Text to token index mapping
    tokenizer: Tokenizer,
}

impl Model {
    /// Builds a model from validated hyperparameters
    pub fn new(config: &ModelConfig) -> Result<Self, LlmError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "Building model: vocab_size={}, max_seq_len={}, hidden_dim={}, num_heads={}",
            config.vocab_size, config.max_seq_len, config.hidden_dim, config.num_heads
        );

        let embedding = tensor::initialize(config.vocab_size, config.hidden_dim, &mut rng);
        let positional_encoding = sinusoidal_encoding(config.max_seq_len, config.hidden_dim);
        let attention = MultiHeadAttention::new(config.num_heads, config.hidden_dim, &mut rng)?;
        let tokenizer = Tokenizer::new(config.tokenizer, config.vocab_size)?;

        Ok(Self {
            config: config.clone(),
            embedding,
            positional_encoding,
            attention,
            tokenizer,
        })
    }

    /// Runs text through tokenization, embedding, positional encoding and attention
    ///
    /// # Returns
    /// * `Result<Matrix, LlmError>` - Hidden states with shape [seq_len, hidden_dim]
    pub fn forward_pass(&self, text: &str) -> Result<Matrix, LlmError> {
        let tokens = self.tokenize(text)?;
        self.forward_tokens(&tokens)
    }

    /// Same as [`Model::forward_pass`] for already tokenized input
    pub fn forward_tokens(&self, tokens: &[usize]) -> Result<Matrix, LlmError> {
        self.validate_tokens(tokens)?;
        let seq_len = tokens.len();

        let embedded = self.token_embedding(tokens)?;
        debug!("Token embeddings shape {:?}", embedded.shape());

        let positions = tensor::slice(&self.positional_encoding, 0, seq_len, 0, self.config.hidden_dim)?;
        let encoded = tensor::add(&embedded, &positions)?;

        let output = self.attention.forward(&encoded)?;
        debug!("Forward pass produced shape {:?}", output.shape());
        Ok(output)
    }

    /// Tokenize text with the configured tokenizer
    pub fn tokenize(&self, text: &str) -> Result<Vec<usize>, LlmError> {
        let tokens = self.tokenizer.encode(text)?;
        debug!("Tokenized {} bytes into {} tokens", text.len(), tokens.len());
        Ok(tokens)
    }

    /// Rows of the embedding table for each token, in order
    pub fn token_embedding(&self, tokens: &[usize]) -> Result<Matrix, LlmError> {
        let hidden_dim = self.config.hidden_dim;
        let mut data = Vec::with_capacity(tokens.len() * hidden_dim);
        for &token in tokens {
            let row = self.embedding.row(token).ok_or(LlmError::TokenOutOfRange {
                token,
                vocab_size: self.config.vocab_size,
            })?;
            data.extend_from_slice(row);
        }
        Matrix::from_vec(tokens.len(), hidden_dim, data)
    }

    /// Reject sequences before any matrix work is attempted
    fn validate_tokens(&self, tokens: &[usize]) -> Result<(), LlmError> {
        if tokens.is_empty() {
            return Err(LlmError::EmptySequence);
        }
        if tokens.len() > self.config.max_seq_len {
            return Err(LlmError::SequenceTooLong {
                len: tokens.len(),
                max: self.config.max_seq_len,
            });
        }
        if let Some(&token) = tokens.iter().find(|&&t| t >= self.config.vocab_size) {
            return Err(LlmError::TokenOutOfRange {
                token,
                vocab_size: self.config.vocab_size,
            });
        }
        Ok(())
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn embedding(&self) -> &Matrix {
        &self.embedding
    }

    pub fn positional_encoding(&self) -> &Matrix {
        &self.positional_encoding
    }

    pub fn attention(&self) -> &MultiHeadAttention {
        &self.attention
    }
}
