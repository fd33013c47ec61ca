//! Infrastructure layer for ue5-qgen
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoadError, ConfigLoader, ConfigValidationError, FileConfig, FileGeminiConfig,
    FileGenerationConfig, FileLoggingConfig, FileOutputConfig, FileQuotaConfig,
    FileStorageConfig,
};
pub use gemini::GeminiGateway;
pub use logging::JsonlGenerationLogger;
pub use storage::JsonFileStore;
