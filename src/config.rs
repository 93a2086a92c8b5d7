//! Configuration System
//!
//! Layered configuration for the provider client, generation defaults and logging.
//! Sources merge as defaults → global file → workspace files → `ANGLESHOT__*`
//! environment variables, or an explicit file replaces the file layers.

use crate::angle::{validate_count, CAMERA_ANGLES};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::provider::ProviderConfig;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Images per run when `--count` is not given
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Directory for written images; a timestamped directory under the workspace when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_count() -> usize {
    crate::angle::MIN_IMAGES
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            output_dir: None,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Generation(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }

        if let Err(e) = validate_count(self.generation.default_count, CAMERA_ANGLES.len()) {
            errors.push(ValidationError::Generation(format!("default_count: {}", e)));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy safe to print: the API key is masked.
    pub fn redacted(&self) -> AppConfig {
        let mut config = self.clone();
        if config.provider.api_key.is_some() {
            config.provider.api_key = Some("********".to_string());
        }
        config
    }
}
