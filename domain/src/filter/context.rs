//! Context filter: every filter except status
//!
//! The context-filtered list is the superset that status tab counts are
//! computed from, so it must never depend on the active status tab.

use crate::question::{DifficultySetting, Question};
use std::collections::BTreeSet;

/// Inputs for [`context_filtered_questions`]
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub questions: &'a [Question],
    pub historical: &'a [Question],
    pub include_history: bool,
    pub filter_by_creator: bool,
    pub search_term: &'a str,
    pub creator_name: &'a str,
    pub discipline: &'a str,
    /// `None` disables difficulty filtering
    pub difficulty: Option<DifficultySetting>,
    /// Carried for the unique filter; never filters here
    pub language: &'a str,
    pub tags: &'a BTreeSet<String>,
}

impl<'a> FilterContext<'a> {
    /// Context with no filters over `questions`
    pub fn new(questions: &'a [Question], tags: &'a BTreeSet<String>) -> Self {
        Self {
            questions,
            historical: &[],
            include_history: false,
            filter_by_creator: false,
            search_term: "",
            creator_name: "",
            discipline: "",
            difficulty: None,
            language: crate::question::DEFAULT_LANGUAGE,
            tags,
        }
    }

    fn admits(&self, q: &Question, search: &str) -> bool {
        if self.filter_by_creator && q.creator_name.as_deref() != Some(self.creator_name) {
            return false;
        }
        if !self.discipline.is_empty() && q.discipline != self.discipline {
            return false;
        }
        if !self.tags.is_empty() && !q.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if let Some(DifficultySetting::Category(category)) = self.difficulty {
            if q.category() != Some(category) {
                return false;
            }
        }
        search.is_empty() || matches_search(q, search)
    }
}

/// Case-insensitive substring search over the searchable fields
///
/// Fields: `uniqueId`, question text, discipline, difficulty, option texts,
/// source excerpt. `needle` must already be lowercase.
fn matches_search(q: &Question, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    q.unique_id.as_deref().is_some_and(hit)
        || hit(&q.question)
        || hit(&q.discipline)
        || hit(&q.difficulty)
        || q.options.values().any(|o| hit(o))
        || q.source_excerpt.as_deref().is_some_and(hit)
}

/// Apply every filter except status
///
/// Source order is the questions followed by the historical questions (when
/// history is included). Order is preserved.
pub fn context_filtered_questions(ctx: &FilterContext<'_>) -> Vec<Question> {
    let search = ctx.search_term.to_lowercase();
    let historical: &[Question] = if ctx.include_history { ctx.historical } else { &[] };
    ctx.questions
        .iter()
        .chain(historical.iter())
        .filter(|q| ctx.admits(q, &search))
        .cloned()
        .collect()
}
