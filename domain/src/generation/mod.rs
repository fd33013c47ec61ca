//! Generator prompts and output handling
//!
//! - [`prompt`] renders the generation and translation prompts
//! - [`parsing`] turns generator output into pending questions
//! - [`similarity`] detects near-duplicate question text

pub mod parsing;
pub mod prompt;
pub mod similarity;

pub use parsing::{ParseDefaults, parse_questions};
pub use prompt::{BatchPlan, GenerationPrompt};
pub use similarity::{DUPLICATE_THRESHOLD, filter_new_questions, remove_near_duplicates, text_similarity};
