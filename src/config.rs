//! Translator configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "?";
pub const DEFAULT_COMPOSITE_SEPARATOR: &str = ";";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by every translation made with one translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Text placed before each positional index, `?` gives `?1`
    #[serde(default = "default_placeholder_prefix")]
    pub placeholder_prefix: String,

    /// Delimiter between the components of a composite key value
    #[serde(default = "default_composite_separator")]
    pub composite_separator: String,
}

fn default_placeholder_prefix() -> String {
    DEFAULT_PLACEHOLDER_PREFIX.to_string()
}

fn default_composite_separator() -> String {
    DEFAULT_COMPOSITE_SEPARATOR.to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            placeholder_prefix: default_placeholder_prefix(),
            composite_separator: default_composite_separator(),
        }
    }
}

impl TranslatorConfig {
    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    pub fn with_composite_separator(mut self, separator: impl Into<String>) -> Self {
        self.composite_separator = separator.into();
        self
    }

    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TranslatorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "placeholder prefix must not be empty".to_string(),
            ));
        }
        if self.composite_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "composite separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
