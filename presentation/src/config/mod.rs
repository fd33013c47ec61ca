//! Presentation-level configuration
//!
//! Resolved output settings for the console.

use qgen_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show spinners while waiting on the generator
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Merge CLI flags over file settings; CLI wins
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color,
            show_progress: !quiet && format == OutputFormat::Table,
        }
    }

    /// Apply the color setting to the terminal styling crate
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_format_wins() {
        let config = OutputConfig::resolve(
            Some(OutputFormat::Json),
            Some(OutputFormat::Table),
            true,
            false,
        );
        assert!(config.is_json());
        assert!(!config.show_progress);
    }

    #[test]
    fn test_quiet_hides_progress() {
        let config = OutputConfig::resolve(None, None, true, true);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(!config.show_progress);
    }
}
