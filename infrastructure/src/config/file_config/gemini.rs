//! Gemini API configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key (default: "GEMINI_API_KEY")
    pub api_key_env: String,
    /// Direct API key (prefer the env var)
    pub api_key: Option<String>,
    /// Base URL up to and including the API version
    pub endpoint: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// Retries after a 429 before giving up
    pub max_retries: u32,
    pub max_output_tokens: u32,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_seconds: Some(120),
            max_retries: 5,
            max_output_tokens: 8192,
        }
    }
}

impl FileGeminiConfig {
    /// Key from the config file, else from the configured env var
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileGeminiConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_output_tokens, 8192);
        assert_eq!(config.timeout_seconds, Some(120));
    }

    #[test]
    fn test_direct_key_wins() {
        let config = FileGeminiConfig {
            api_key: Some("direct".to_string()),
            api_key_env: "QGEN_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("direct"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = FileGeminiConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "QGEN_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
