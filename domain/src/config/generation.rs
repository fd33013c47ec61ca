//! Generation settings

use crate::question::{DEFAULT_LANGUAGE, DifficultySetting};
use crate::quota::BatchSize;
use serde::{Deserialize, Serialize};

/// Discipline selected when nothing is configured
pub const DEFAULT_DISCIPLINE: &str = "Technical Art";
/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Session generation parameters, persisted under `ue5_gen_config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub discipline: String,
    pub difficulty: DifficultySetting,
    pub language: String,
    pub batch_size: BatchSize,
    pub creator_name: String,
    pub temperature: f32,
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            discipline: DEFAULT_DISCIPLINE.to_string(),
            difficulty: DifficultySetting::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            batch_size: BatchSize::default(),
            creator_name: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl GenerationConfig {
    /// Whether `other` differs in a field that scopes the question list
    pub fn context_differs(&self, other: &GenerationConfig) -> bool {
        self.discipline != other.discipline
            || self.difficulty != other.difficulty
            || self.language != other.language
    }

    pub fn has_creator(&self) -> bool {
        !self.creator_name.trim().is_empty()
    }
}
