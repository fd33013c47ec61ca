//! Domain layer for ue5-qgen
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Questions and categories
//!
//! A [`Question`] is one language variant of a logical question; variants
//! share a `uniqueId`. Quotas and filters work on a [`Category`]
//! (difficulty × type, e.g. `Easy MC`).
//!
//! ## Pipeline
//!
//! - **Quota**: [`validate_generation`] gates every generation batch
//! - **Filters**: context filter → status filter, with tab counts taken from
//!   the context stage
//! - **Unique filter**: one representative per logical question for the
//!   active language
//! - **Grounding**: [`validate_question`] checks cited URL, excerpt and answer
//! - **Export**: [`CsvExport`] renders review sheets, one per segment
//! - **View state**: list preferences change only through [`reduce`]

pub mod config;
pub mod core;
pub mod export;
pub mod filter;
pub mod generation;
pub mod question;
pub mod quota;
pub mod view;

// Re-export commonly used types
pub use config::{GenerationConfig, OutputFormat};
pub use core::error::DomainError;
pub use export::{CsvExport, segment_file_name, segment_questions};
pub use filter::{
    FilterContext, SortKey, StatusCounts, StatusFilter, context_filtered_questions,
    filtered_questions, sort_questions, unique_questions,
};
pub use generation::{
    DUPLICATE_THRESHOLD, GenerationPrompt, ParseDefaults, filter_new_questions, parse_questions,
};
pub use question::{
    Category, DEFAULT_LANGUAGE, Difficulty, DifficultySetting, Question, QuestionStatus,
    QuestionType, Validation, validate_question,
};
pub use quota::{
    BatchSize, QuotaCheck, QuotaLimit, QuotaScope, QuotaStatus, QuotaTargets, quota_status,
    validate_generation,
};
pub use view::{AppMode, PersistedPreferences, ViewAction, ViewState, reduce};
