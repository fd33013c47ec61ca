//! Review mutations over a question collection
//!
//! These are the state changes a reviewer makes: accept, reject, delete,
//! kick a question back to review, clear the pending queue, and bulk-accept
//! verified high scorers, and reject pending questions whose sources fail a
//! critical grounding check.

use super::entities::{Question, QuestionStatus};
use super::validation::validate_question;
use crate::core::error::DomainError;
use chrono::Utc;

/// Critique score at or above which a question counts as passing
pub const QUALITY_PASS_THRESHOLD: u8 = 70;

/// Set the status of the question with the given `id`.
///
/// A rejection stores `reason`; any other status clears it.
pub fn update_status(
    questions: &mut [Question],
    id: &str,
    status: QuestionStatus,
    reason: Option<String>,
) -> Result<(), DomainError> {
    let question = questions
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or_else(|| DomainError::QuestionNotFound(id.to_string()))?;

    let now = Utc::now();
    question.status = Some(status);
    (question.rejection_reason, question.rejected_at) = match status {
        QuestionStatus::Rejected => (reason, Some(now)),
        _ => (None, None),
    };
    question.updated_at = Some(now);
    Ok(())
}

/// Remove a single language variant by `id`.
pub fn delete_question(questions: &mut Vec<Question>, id: &str) -> Result<Question, DomainError> {
    let index = questions
        .iter()
        .position(|q| q.id == id)
        .ok_or_else(|| DomainError::QuestionNotFound(id.to_string()))?;
    Ok(questions.remove(index))
}

/// Send every variant of a logical question back to the pending queue.
///
/// Returns the number of variants touched.
pub fn kick_back(questions: &mut [Question], unique_id: &str) -> Result<usize, DomainError> {
    let now = Utc::now();
    let mut touched = 0;
    for q in questions.iter_mut().filter(|q| q.group_key() == unique_id) {
        q.status = Some(QuestionStatus::Pending);
        q.rejection_reason = None;
        q.rejected_at = None;
        q.updated_at = Some(now);
        touched += 1;
    }

    if touched == 0 {
        return Err(DomainError::QuestionNotFound(unique_id.to_string()));
    }
    Ok(touched)
}

/// Drop every question that is neither accepted nor rejected.
///
/// Returns the number removed.
pub fn clear_pending(questions: &mut Vec<Question>) -> usize {
    let before = questions.len();
    questions.retain(|q| !q.is_pending());
    before - questions.len()
}

/// Accept human-verified questions whose critique score meets `threshold`.
///
/// Returns the ids that changed.
pub fn accept_high_scores(questions: &mut [Question], threshold: u8) -> Vec<String> {
    let now = Utc::now();
    questions
        .iter_mut()
        .filter(|q| {
            q.human_verified
                && q.status != Some(QuestionStatus::Accepted)
                && q.critique_score.is_some_and(|s| s >= threshold)
        })
        .map(|q| {
            q.status = Some(QuestionStatus::Accepted);
            q.rejection_reason = None;
            q.rejected_at = None;
            q.updated_at = Some(now);
            q.id.clone()
        })
        .collect()
}

/// Reject pending questions with a critical grounding failure, recording the
/// first critical warning as the reason.
///
/// Returns the ids that changed.
pub fn reject_ungrounded(questions: &mut [Question]) -> Vec<String> {
    let now = Utc::now();
    let mut rejected = Vec::new();
    for q in questions.iter_mut().filter(|q| q.is_pending()) {
        let verdict = validate_question(q);
        if !verdict.is_critical_failure {
            continue;
        }
        q.status = Some(QuestionStatus::Rejected);
        q.rejection_reason = verdict
            .warnings
            .into_iter()
            .find(|w| w.starts_with("Critical"));
        q.rejected_at = Some(now);
        q.updated_at = Some(now);
        rejected.push(q.id.clone());
    }
    rejected
}
