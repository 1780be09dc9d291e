use crate::llm::error::LlmError;

/// Trait defining the interface for all tokenizer implementations
pub trait TokenizerStrategy: Send + Sync {
    /// Convert text into token indices, each below `vocab_size()`
    fn encode(&self, text: &str) -> Result<Vec<usize>, LlmError>;

    /// Number of distinct indices this tokenizer can emit
    fn vocab_size(&self) -> usize;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
