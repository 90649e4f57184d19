//! Runtime configuration.
//!
//! Configuration is an explicit value constructed at the composition root and
//! passed down; there is no process-wide configuration singleton. Required
//! settings are validated before any network activity.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{ConfigError, ModelBinding, SamplingParams};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuillConfig {
    pub ollama: OllamaConfig,
}

/// Inference server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Model every stage runs against, e.g. `gemma3:1b`.
    pub model: String,
    /// Sampling parameters shared by every stage.
    #[serde(default)]
    pub sampling: SamplingParams,
}

impl QuillConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let config: QuillConfig =
            toml::from_str(&raw).map_err(|source| ConfigError::Invalid {
                path: path.display().to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Assemble configuration from `QUILL_BASE_URL` and `QUILL_MODEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = QuillConfig {
            ollama: OllamaConfig {
                base_url: std::env::var("QUILL_BASE_URL").unwrap_or_default(),
                model: std::env::var("QUILL_MODEL").unwrap_or_default(),
                sampling: SamplingParams::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check required settings. Called by the loaders; callers assembling a
    /// config by hand should call it before any I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ollama.base_url.trim().is_empty() {
            return Err(ConfigError::MissingSetting("ollama.base_url"));
        }
        if self.ollama.model.trim().is_empty() {
            return Err(ConfigError::MissingSetting("ollama.model"));
        }
        Ok(())
    }

    /// The model binding described by this configuration.
    pub fn binding(&self) -> ModelBinding {
        ModelBinding::new(&self.ollama.base_url, &self.ollama.model)
            .with_params(self.ollama.sampling)
    }
}
