//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application directory under the platform config directory
const APP_DIR: &str = "ue5-qgen";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["qgen.toml", ".qgen.toml"];

/// Prefix for environment overrides
const ENV_PREFIX: &str = "QGEN_";

/// Errors from loading configuration
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `QGEN_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./qgen.toml` or `./.qgen.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/ue5-qgen/config.toml`
    /// 5. Default values
    ///
    /// The merged result is validated before it is returned.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigLoadError> {
        let figment = Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
            ENV_PREFIX,
        );
        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
        env_prefix: &str,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(env_prefix).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/ue5-qgen/config.toml if set,
    /// otherwise falls back to ~/.config/ue5-qgen/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./qgen.toml or ./.qgen.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
