//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod gemini;
mod generation;
mod logging;
mod output;
mod quota;
mod storage;

pub use gemini::FileGeminiConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use quota::FileQuotaConfig;
pub use storage::{DATA_DIR_NAME, FileStorageConfig};

use qgen_application::BehaviorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("gemini.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("quota.{0} must be greater than 0")]
    ZeroQuotaTarget(&'static str),

    #[error("generation.temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session defaults for generation
    pub generation: FileGenerationConfig,
    /// Generation targets
    pub quota: FileQuotaConfig,
    /// Where questions and preferences are stored
    pub storage: FileStorageConfig,
    /// Gemini API settings
    pub gemini: FileGeminiConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Structured log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.gemini.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if let Some(model) = &self.generation.model
            && model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if let Some(t) = self.generation.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(ConfigValidationError::InvalidTemperature(t));
        }

        if self.quota.total == 0 {
            return Err(ConfigValidationError::ZeroQuotaTarget("total"));
        }
        if self.quota.per_category == 0 {
            return Err(ConfigValidationError::ZeroQuotaTarget("per_category"));
        }

        Ok(())
    }

    /// Behavior settings for the application layer
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.gemini.timeout_seconds)
            .with_quota(self.quota.to_targets())
    }
}
