//! Question repository port
//!
//! Persistent storage for the question collections and the session config.
//! Keys match the browser storage layout so exported data stays compatible.

use qgen_domain::{GenerationConfig, Question};
use thiserror::Error;

/// Store key for the working question collection
pub const QUESTIONS_KEY: &str = "ue5_gen_questions";
/// Store key for historical (previously published) questions
pub const HISTORY_KEY: &str = "ue5_gen_history";
/// Store key for the generation config
pub const CONFIG_KEY: &str = "ue5_gen_config";

/// Errors from the persistent store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error for '{key}': {message}")]
    Io { key: String, message: String },

    #[error("Corrupt data under '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl StoreError {
    pub fn io(key: &str, message: impl Into<String>) -> Self {
        StoreError::Io {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn corrupt(key: &str, message: impl Into<String>) -> Self {
        StoreError::Corrupt {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Repository for questions and generation settings
///
/// A missing key reads as empty (or `None` for the config).
pub trait QuestionRepository: Send + Sync {
    fn load_questions(&self) -> Result<Vec<Question>, StoreError>;

    fn save_questions(&self, questions: &[Question]) -> Result<(), StoreError>;

    fn load_historical(&self) -> Result<Vec<Question>, StoreError>;

    fn save_historical(&self, questions: &[Question]) -> Result<(), StoreError>;

    fn load_config(&self) -> Result<Option<GenerationConfig>, StoreError>;

    fn save_config(&self, config: &GenerationConfig) -> Result<(), StoreError>;

    /// Remove every stored key, preferences included
    fn factory_reset(&self) -> Result<(), StoreError>;
}
