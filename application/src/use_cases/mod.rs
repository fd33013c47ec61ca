//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod export_questions;
pub mod filtering;
pub mod generate_questions;
pub mod review_questions;
pub mod translate_question;
