//! Logging infrastructure: structured generation logging.
//!
//! Provides [`JsonlGenerationLogger`], a JSONL file writer that implements
//! the [`GenerationLogger`](qgen_application::GenerationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlGenerationLogger;
