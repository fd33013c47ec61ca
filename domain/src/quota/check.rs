//! Generation gate
//!
//! [`validate_generation`] decides whether a batch may be generated given
//! the questions that already exist. Rejected questions never count; pending
//! and accepted ones (including missing status) do.

use super::batch::BatchSize;
use super::targets::{QuotaScope, QuotaTargets};
use crate::question::{Category, Difficulty, DifficultySetting, Question, QuestionType};
use serde::{Deserialize, Serialize};

/// Largest MC vs T/F gap tolerated within one discipline and difficulty level
pub const IMBALANCE_THRESHOLD: usize = 3;

/// Which limit blocked a generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotaLimit {
    Total,
    Category,
    TypeBalance,
}

/// Result of a quota check (Value Object, never persisted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaCheck {
    pub allowed: bool,
    pub reason: String,
    /// Largest batch the caller may request; 0 when blocked
    pub max_allowed: usize,
    /// Set when the batch has to shrink to fit or the types are out of balance
    pub warning: bool,
    pub blocked_by: Option<QuotaLimit>,
    /// Under-represented type to generate next, when the mix is out of balance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_type: Option<QuestionType>,
}

impl QuotaCheck {
    fn blocked(limit: QuotaLimit, reason: String) -> Self {
        Self {
            allowed: false,
            reason,
            max_allowed: 0,
            warning: false,
            blocked_by: Some(limit),
            force_type: None,
        }
    }

    /// Batch size to actually request, if generation may proceed
    pub fn effective_batch(&self) -> Option<BatchSize> {
        if self.allowed {
            BatchSize::try_new(self.max_allowed)
        } else {
            None
        }
    }
}

/// Live (non-rejected) questions overall
pub(crate) fn live_total(questions: &[Question]) -> usize {
    questions.iter().filter(|q| !q.is_rejected()).count()
}

/// Live questions in `category`, optionally narrowed to `discipline`
pub(crate) fn live_in_category(
    questions: &[Question],
    category: Category,
    discipline: Option<&str>,
) -> usize {
    questions
        .iter()
        .filter(|q| !q.is_rejected())
        .filter(|q| q.category() == Some(category))
        .filter(|q| discipline.is_none_or(|d| q.discipline == d))
        .count()
}

/// Live `(multiple choice, true/false)` counts for one discipline and level
pub fn type_counts(questions: &[Question], discipline: &str, level: Difficulty) -> (usize, usize) {
    questions
        .iter()
        .filter(|q| !q.is_rejected())
        .filter(|q| q.discipline == discipline && q.difficulty_level() == Some(level))
        .fold((0, 0), |(mc, tf), q| match q.parsed_type() {
            Some(QuestionType::MultipleChoice) => (mc + 1, tf),
            Some(QuestionType::TrueFalse) => (mc, tf + 1),
            None => (mc, tf),
        })
}

/// Decide whether a batch of `requested` questions may be generated.
///
/// Checks run in order: the total target, the category target (skipped for
/// `Balanced All`), then the MC vs T/F balance of the discipline at the
/// requested level. Asking for more of the over-represented type is
/// refused; asking for the other type passes with a warning. When some room
/// remains but not enough, the check passes with a warning and
/// `max_allowed` set to the remaining slots.
pub fn validate_generation(
    discipline: &str,
    difficulty: &DifficultySetting,
    requested: BatchSize,
    questions: &[Question],
    targets: &QuotaTargets,
) -> QuotaCheck {
    let total_current = live_total(questions);
    if total_current >= targets.total {
        return QuotaCheck::blocked(
            QuotaLimit::Total,
            format!(
                "Total quota reached ({} questions). No more generation allowed.",
                targets.total
            ),
        );
    }
    let total_remaining = targets.total - total_current;

    let mut imbalance = None;
    let (remaining, label) = match difficulty.category() {
        None => (total_remaining, "the total quota".to_string()),
        Some(category) => {
            let scope = match targets.scope {
                QuotaScope::Category => None,
                QuotaScope::Discipline => Some(discipline),
            };
            let current = live_in_category(questions, category, scope);
            let category_remaining = targets.per_category.saturating_sub(current);
            if category_remaining == 0 {
                return QuotaCheck::blocked(
                    QuotaLimit::Category,
                    format!(
                        "Category \"{}\" is full ({}/{}). Select a different difficulty.",
                        category, current, targets.per_category
                    ),
                );
            }

            let (mc, tf) = type_counts(questions, discipline, category.difficulty);
            if mc.abs_diff(tf) > IMBALANCE_THRESHOLD {
                let needs_more = if mc < tf {
                    QuestionType::MultipleChoice
                } else {
                    QuestionType::TrueFalse
                };
                if category.question_type != needs_more {
                    return QuotaCheck {
                        force_type: Some(needs_more),
                        ..QuotaCheck::blocked(
                            QuotaLimit::TypeBalance,
                            format!(
                                "Type imbalance detected at {}: {} MC vs {} T/F. Generate {} questions first to restore balance.",
                                category.difficulty, mc, tf, needs_more
                            ),
                        )
                    };
                }
                imbalance = Some((mc, tf, needs_more));
            }

            (
                category_remaining.min(total_remaining),
                format!("\"{}\"", category),
            )
        }
    };
    let force_type = imbalance.map(|(_, _, needs_more)| needs_more);

    if requested.get() > remaining {
        return QuotaCheck {
            allowed: true,
            reason: format!(
                "Only {} questions remaining for {}. Batch size reduced.",
                remaining, label
            ),
            max_allowed: remaining,
            warning: true,
            blocked_by: None,
            force_type,
        };
    }

    if let Some((mc, tf, needs_more)) = imbalance {
        return QuotaCheck {
            allowed: true,
            reason: format!(
                "Imbalance detected ({} MC, {} T/F). Prioritizing {}.",
                mc, tf, needs_more
            ),
            max_allowed: requested.get(),
            warning: true,
            blocked_by: None,
            force_type,
        };
    }

    QuotaCheck {
        allowed: true,
        reason: "Generation allowed".to_string(),
        max_allowed: requested.get(),
        warning: false,
        blocked_by: None,
        force_type: None,
    }
}
