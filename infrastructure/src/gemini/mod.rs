//! Gemini `generateContent` adapter
//!
//! - [`gateway`]: [`LlmGateway`](qgen_application::LlmGateway) implementation
//!   with rate-limit retries
//! - [`protocol`]: request and response bodies

pub mod gateway;
pub mod protocol;

pub use gateway::GeminiGateway;
