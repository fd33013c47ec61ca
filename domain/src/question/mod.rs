//! Question domain.
//!
//! - [`entities::Question`]: one language variant of a logical question
//! - [`category::Category`]: difficulty × type quota bucket
//! - [`review`]: reviewer state changes over a collection
//! - [`validation`]: source grounding checks on a single question

pub mod category;
pub mod entities;
pub mod review;
pub mod validation;

pub use category::{Category, Difficulty, DifficultySetting, QuestionType};
pub use entities::{DEFAULT_LANGUAGE, Question, QuestionStatus};
pub use validation::{Validation, validate_question};
