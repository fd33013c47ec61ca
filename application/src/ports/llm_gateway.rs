//! LLM Gateway port
//!
//! Defines the interface for asking a text-generation model for output.

use async_trait::async_trait;
use qgen_domain::GenerationConfig;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid API key or request: {0}")]
    InvalidRequest(String),

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Errors that will not go away by retrying with the same key
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidRequest(_) | GatewayError::Unauthorized(_)
        )
    }
}

/// A single generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            model: qgen_domain::config::DEFAULT_MODEL.to_string(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature: qgen_domain::config::DEFAULT_TEMPERATURE,
        }
    }

    /// Take model and temperature from the session config
    pub fn with_config(mut self, config: &GenerationConfig) -> Self {
        self.model = config.model.clone();
        self.temperature = config.temperature;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the generator.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the prompts and return the generated text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}
