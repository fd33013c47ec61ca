//! Question filters
//!
//! Filtering runs in two stages so tab counts stay correct:
//!
//! 1. [`context_filtered_questions`] applies everything except status
//! 2. [`filtered_questions`] applies the status tab last
//!
//! [`unique_questions`] then collapses language variants and
//! [`sort_questions`] orders the result for display.

pub mod context;
pub mod criteria;
pub mod sort;
pub mod status;
pub mod unique;

pub use context::{FilterContext, context_filtered_questions};
pub use criteria::StatusFilter;
pub use sort::{SortKey, sort_questions};
pub use status::{StatusCounts, filtered_questions};
pub use unique::unique_questions;
