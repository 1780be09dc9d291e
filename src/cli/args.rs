use std::path::PathBuf;

use clap::Parser;

use crate::config::{OutputFormat, Settings};
use crate::llm::tokenizer::TokenizerType;

/// Run a single forward pass of a tiny attention-only language model
#[derive(Debug, Parser)]
#[command(name = "tinyllm", version, about)]
pub struct Args {
    /// Text to run through the model (defaults to `run.text` from the configuration)
    pub text: Option<String>,

    /// Directory holding default.toml and local.toml
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Number of entries in the embedding table
    #[arg(long)]
    pub vocab_size: Option<usize>,

    /// Longest token sequence the model accepts
    #[arg(long)]
    pub max_seq_len: Option<usize>,

    /// Hidden dimension; must be divisible by --num-heads
    #[arg(long)]
    pub hidden_dim: Option<usize>,

    /// Number of attention heads
    #[arg(long)]
    pub num_heads: Option<usize>,

    /// Seed for weight initialization
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tokenizer: word or byte
    #[arg(long)]
    pub tokenizer: Option<TokenizerType>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Command-line values take precedence over loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        let model = &mut settings.model;
        if let Some(v) = self.vocab_size {
            model.vocab_size = v;
        }
        if let Some(v) = self.max_seq_len {
            model.max_seq_len = v;
        }
        if let Some(v) = self.hidden_dim {
            model.hidden_dim = v;
        }
        if let Some(v) = self.num_heads {
            model.num_heads = v;
        }
        if let Some(v) = self.seed {
            model.seed = Some(v);
        }
        if let Some(v) = self.tokenizer {
            model.tokenizer = v;
        }
        if let Some(v) = &self.text {
            settings.run.text = v.clone();
        }
        if let Some(v) = self.format {
            settings.run.format = v;
        }
        if let Some(v) = &self.log_level {
            settings.logging.level = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_settings() {
        let mut settings = Settings::from_toml_str("").unwrap();
        let args = Args::parse_from([
            "tinyllm",
            "--hidden-dim",
            "12",
            "--num-heads",
            "3",
            "--seed",
            "5",
            "--tokenizer",
            "byte",
            "--format",
            "json",
            "hello there",
        ]);
        args.apply(&mut settings);

        assert_eq!(settings.model.hidden_dim, 12);
        assert_eq!(settings.model.num_heads, 3);
        assert_eq!(settings.model.seed, Some(5));
        assert_eq!(settings.model.tokenizer, TokenizerType::Byte);
        assert_eq!(settings.run.format, OutputFormat::Json);
        assert_eq!(settings.run.text, "hello there");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let mut settings = Settings::from_toml_str("").unwrap();
        let before = settings.model.clone();
        Args::parse_from(["tinyllm"]).apply(&mut settings);
        assert_eq!(settings.model, before);
        assert_eq!(settings.run.text, "This doesn't matter for the moment");
    }
}
