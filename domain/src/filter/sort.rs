//! Sorting of the unique question list

use crate::core::error::DomainError;
use crate::question::{Difficulty, Question};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order for the displayed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Input order
    #[default]
    Default,
    Newest,
    Oldest,
    Language,
    Discipline,
    Difficulty,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Language => "language",
            SortKey::Discipline => "discipline",
            SortKey::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(SortKey::Default),
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "language" => Ok(SortKey::Language),
            "discipline" => Ok(SortKey::Discipline),
            "difficulty" => Ok(SortKey::Difficulty),
            _ => Err(DomainError::InvalidSortKey(s.to_string())),
        }
    }
}

fn difficulty_rank(q: &Question) -> u8 {
    match q.difficulty_level() {
        Some(Difficulty::Easy) => 0,
        Some(Difficulty::Medium) => 1,
        Some(Difficulty::Hard) => 2,
        None => 3,
    }
}

/// Missing values sort after present ones regardless of direction
fn by_date<T: Ord>(a: Option<T>, b: Option<T>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort in place
pub fn sort_questions(questions: &mut [Question], key: SortKey) {
    match key {
        SortKey::Default => {}
        SortKey::Newest => questions.sort_by(|a, b| by_date(a.date_added, b.date_added, true)),
        SortKey::Oldest => questions.sort_by(|a, b| by_date(a.date_added, b.date_added, false)),
        SortKey::Language => questions.sort_by(|a, b| a.language().cmp(b.language())),
        SortKey::Discipline => questions.sort_by(|a, b| a.discipline.cmp(&b.discipline)),
        SortKey::Difficulty => questions.sort_by_key(difficulty_rank),
    }
}
