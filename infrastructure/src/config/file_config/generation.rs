//! Generation defaults from TOML (`[generation]` section)

use qgen_domain::{BatchSize, DifficultySetting, GenerationConfig};
use serde::{Deserialize, Serialize};

/// Raw generation defaults from TOML
///
/// Seeds the session settings the first time the tool runs; once settings
/// are stored, the stored values win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub discipline: Option<String>,
    /// Category label such as `"Easy MC"` or `"Balanced All"`
    pub difficulty: Option<DifficultySetting>,
    pub language: Option<String>,
    pub batch_size: Option<BatchSize>,
    pub creator_name: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

impl FileGenerationConfig {
    /// Build session settings, falling back to built-in defaults
    pub fn to_generation_config(&self) -> GenerationConfig {
        let defaults = GenerationConfig::default();
        GenerationConfig {
            discipline: self.discipline.clone().unwrap_or(defaults.discipline),
            difficulty: self.difficulty.unwrap_or(defaults.difficulty),
            language: self.language.clone().unwrap_or(defaults.language),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            creator_name: self.creator_name.clone().unwrap_or(defaults.creator_name),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            model: self.model.clone().unwrap_or(defaults.model),
        }
    }
}
