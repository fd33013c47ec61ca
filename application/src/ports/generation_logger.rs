//! Port for structured generation logging.
//!
//! Defines the [`GenerationLogger`] trait for recording generation events
//! (requests, parsed batches, quota blocks, translations) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record (JSONL) of what was asked for and what came back.

use serde_json::Value;

/// A structured generation event.
pub struct GenerationEvent {
    /// Event type identifier (e.g., "generation_request", "quota_blocked").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl GenerationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging generation events.
///
/// `log` is synchronous and infallible; write failures are dropped.
pub trait GenerationLogger: Send + Sync {
    fn log(&self, event: GenerationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoGenerationLogger;

impl GenerationLogger for NoGenerationLogger {
    fn log(&self, _event: GenerationEvent) {}
}
