//! Gemini LLM gateway.
//!
//! Sends one `generateContent` request per call. Rate limiting (429) is
//! retried, honoring the server's "retry in Ns" hint and otherwise backing
//! off exponentially. Transient 5xx responses are retried the same way.
//! 400 and 401/403 are reported as key problems and never retried.

use super::protocol::{GenerateContentRequest, GenerateContentResponse, error_message};
use async_trait::async_trait;
use qgen_application::{GatewayError, GenerationRequest, LlmGateway};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Public Gemini API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Retries after the first attempt
const DEFAULT_MAX_RETRIES: u32 = 5;

/// First backoff delay; doubles with each retry (5s, 10s, 20s...)
const DEFAULT_BASE_BACKOFF: Duration = Duration::from_secs(5);

const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Gateway to the Gemini `generateContent` API
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    endpoint: String,
    max_retries: u32,
    max_output_tokens: u32,
    base_backoff: Duration,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            base_backoff: DEFAULT_BASE_BACKOFF,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_base_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        )
    }
}

/// Wait time the server asked for, from messages like "Please retry in 17.5s."
fn retry_hint(message: &str) -> Option<Duration> {
    const MARKER: &str = "retry in ";
    let lower = message.to_lowercase();
    let rest = &lower[lower.find(MARKER)? + MARKER.len()..];
    let number: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !rest[number.len()..].starts_with('s') {
        return None;
    }
    Duration::try_from_secs_f64(number.parse().ok()?).ok()
}

/// `base × 2^attempt`
fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let url = self.url(&request.model);
        let body = GenerateContentRequest::new(request, self.max_output_tokens);
        let mut attempt = 0;

        loop {
            debug!("POST {} (attempt {})", url, attempt + 1);
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

            if status.is_success() {
                let parsed: GenerateContentResponse = serde_json::from_str(&text)
                    .map_err(|e| GatewayError::Other(format!("Malformed response: {}", e)))?;
                return match parsed.text() {
                    Some(text) => Ok(text),
                    None => {
                        warn!(
                            "Gemini returned no text (finish reason: {})",
                            parsed.finish_reason().unwrap_or("unknown")
                        );
                        Err(GatewayError::EmptyResponse)
                    }
                };
            }

            let message =
                error_message(&text).unwrap_or_else(|| format!("API error: {}", status.as_u16()));

            let wait = match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempt >= self.max_retries {
                        warn!("Rate limit exhausted after {} retries", attempt);
                        return Err(GatewayError::RateLimited { retries: attempt });
                    }
                    retry_hint(&message).unwrap_or_else(|| backoff(self.base_backoff, attempt))
                }
                StatusCode::BAD_REQUEST => return Err(GatewayError::InvalidRequest(message)),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(GatewayError::Unauthorized(message));
                }
                s if s.is_server_error() && attempt < self.max_retries => {
                    backoff(self.base_backoff, attempt)
                }
                _ => {
                    return Err(GatewayError::RequestFailed(format!(
                        "{}: {}",
                        status.as_u16(),
                        message
                    )));
                }
            };

            warn!(
                "Gemini returned {}; retrying in {:.1}s ({}/{})",
                status.as_u16(),
                wait.as_secs_f64(),
                attempt + 1,
                self.max_retries
            );
            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }
}
