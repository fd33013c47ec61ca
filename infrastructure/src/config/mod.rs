//! Configuration file loading for ue5-qgen
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `QGEN_*` (nested with `__`, e.g. `QGEN_GEMINI__API_KEY`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./qgen.toml` or `./.qgen.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/ue5-qgen/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DATA_DIR_NAME, FileConfig, FileGeminiConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileQuotaConfig, FileStorageConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader};
