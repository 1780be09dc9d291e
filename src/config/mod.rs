// Required external crates for configuration management and serialization
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::llm::error::LlmError;
use crate::llm::tokenizer::strategies::BYTE_VOCAB;
use crate::llm::tokenizer::TokenizerType;

/// Hyperparameters fixed at model construction
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ModelConfig {
    /// Number of rows in the embedding table
    pub vocab_size: usize,
    /// Number of rows in the positional encoding table
    pub max_seq_len: usize,
    /// Width of every hidden state; must be divisible by `num_heads`
    pub hidden_dim: usize,
    /// Number of attention heads
    pub num_heads: usize,
    /// Seed for weight initialization; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// How text is mapped to token indices
    #[serde(default)]
    pub tokenizer: TokenizerType,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vocab_size: 30000,
            max_seq_len: 512,
            hidden_dim: 8,
            num_heads: 2,
            seed: None,
            tokenizer: TokenizerType::Word,
        }
    }
}

impl ModelConfig {
    /// Check positivity, head divisibility and that the vocabulary fits the tokenizer
    pub fn validate(&self) -> Result<(), LlmError> {
        for (name, value) in [
            ("vocab_size", self.vocab_size),
            ("max_seq_len", self.max_seq_len),
            ("hidden_dim", self.hidden_dim),
            ("num_heads", self.num_heads),
        ] {
            if value == 0 {
                return Err(LlmError::InvalidConfig(format!("{} must be greater than 0", name)));
            }
        }

        if self.hidden_dim % self.num_heads != 0 {
            return Err(LlmError::InvalidConfig(format!(
                "hidden_dim ({}) must be divisible by num_heads ({})",
                self.hidden_dim, self.num_heads
            )));
        }

        if self.tokenizer == TokenizerType::Byte && self.vocab_size < BYTE_VOCAB {
            return Err(LlmError::InvalidConfig(format!(
                "byte tokenizer needs vocab_size >= {}, got {}",
                BYTE_VOCAB, self.vocab_size
            )));
        }

        Ok(())
    }

    /// Width of each attention head
    pub fn head_dim(&self) -> usize {
        self.hidden_dim / self.num_heads.max(1)
    }
}

/// How the output matrix is printed
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored table, one row per token
    Table,
    /// Machine-readable JSON document
    Json,
}

/// Configuration for a single run of the driver
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// Text fed to the model when none is given on the command line
    pub text: String,
    /// Output rendering
    pub format: OutputFormat,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Optional directory for daily log files; stderr when absent
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Model hyperparameters
    pub model: ModelConfig,
    /// Driver settings
    pub run: RunConfig,
    /// Logging-related settings
    pub logging: LoggingConfig,
}

/// Implementation for loading and parsing configuration
impl Settings {
    /// Loads settings in the following order of precedence (highest to lowest):
    /// 1. Environment variables prefixed with TINYLLM_ (nested keys split by `__`)
    /// 2. Local config file (local.toml) if present
    /// 3. Default config file (default.toml) if present
    /// 4. Built-in defaults
    pub fn from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        // Convert paths to strings and keep them alive
        let default_config_path = config_dir.join("default.toml");
        let local_config_path = config_dir.join("local.toml");
        let default_config_path = default_config_path.to_string_lossy();
        let local_config_path = local_config_path.to_string_lossy();

        let settings = Self::builder()?
            .add_source(File::with_name(&default_config_path).required(false))
            .add_source(File::with_name(&local_config_path).required(false))
            .add_source(
                Environment::with_prefix("TINYLLM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        // Validate settings after loading
        settings.validate()?;

        Ok(settings)
    }

    /// Parses settings from a TOML document layered over the built-in defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Self::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;

        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let model = ModelConfig::default();
        Config::builder()
            .set_default("model.vocab_size", model.vocab_size as u64)?
            .set_default("model.max_seq_len", model.max_seq_len as u64)?
            .set_default("model.hidden_dim", model.hidden_dim as u64)?
            .set_default("model.num_heads", model.num_heads as u64)?
            .set_default("model.tokenizer", model.tokenizer.to_string())?
            .set_default("run.text", "This doesn't matter for the moment")?
            .set_default("run.format", "table")?
            .set_default("logging.level", "info")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(format!(
                "Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                self.logging.level
            ))),
        }?;

        // Create log file directory if configured and doesn't exist
        if let Some(log_dir) = &self.logging.file {
            if !log_dir.exists() {
                std::fs::create_dir_all(log_dir).map_err(|e| {
                    ConfigError::Message(format!(
                        "Failed to create log directory at {}: {}",
                        log_dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_document() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.model, ModelConfig::default());
        assert_eq!(settings.run.format, OutputFormat::Table);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.file.is_none());
    }

    #[test]
    fn test_document_overrides_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [model]
            hidden_dim = 16
            num_heads = 4
            seed = 42
            tokenizer = "byte"

            [run]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(settings.model.hidden_dim, 16);
        assert_eq!(settings.model.head_dim(), 4);
        assert_eq!(settings.model.seed, Some(42));
        assert_eq!(settings.model.tokenizer, TokenizerType::Byte);
        assert_eq!(settings.model.vocab_size, 30000);
        assert_eq!(settings.run.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_indivisible_heads() {
        let err = Settings::from_toml_str("[model]\nhidden_dim = 7\nnum_heads = 2\n").unwrap_err();
        assert!(err.to_string().contains("divisible"));
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let err = Settings::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("Invalid logging level"));
    }

    #[test]
    fn test_model_config_rejects_zero_dimensions() {
        let config = ModelConfig { max_seq_len: 0, ..ModelConfig::default() };
        assert!(matches!(config.validate(), Err(LlmError::InvalidConfig(_))));

        let config = ModelConfig { num_heads: 0, ..ModelConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_byte_tokenizer_needs_full_byte_vocab() {
        let err = Settings::from_toml_str("[model]\nvocab_size = 100\ntokenizer = \"byte\"\n").unwrap_err();
        assert!(err.to_string().contains("vocab_size >= 256"));

        let config = ModelConfig { vocab_size: 255, tokenizer: TokenizerType::Byte, ..ModelConfig::default() };
        assert!(matches!(config.validate(), Err(LlmError::InvalidConfig(_))));

        let config = ModelConfig { vocab_size: 256, ..config };
        assert!(config.validate().is_ok());

        // The word tokenizer hashes into any vocabulary size
        let config = ModelConfig { vocab_size: 100, tokenizer: TokenizerType::Word, ..ModelConfig::default() };
        assert!(config.validate().is_ok());
    }
}
