//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod generation;
mod output_format;

pub use generation::{DEFAULT_DISCIPLINE, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationConfig};
pub use output_format::OutputFormat;
