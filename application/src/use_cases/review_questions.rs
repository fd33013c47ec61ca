//! Review Questions use case.
//!
//! Each method loads the stored questions, applies one review mutation and
//! saves the result. Nothing is saved when the mutation fails.
//!
//! Single-question actions fall back to the historical list when the id is
//! not a working question. Deleting and kicking back cover both lists.

use crate::ports::question_repository::{QuestionRepository, StoreError};
use qgen_domain::question::review::{
    QUALITY_PASS_THRESHOLD, accept_high_scores, clear_pending, delete_question, kick_back,
    reject_ungrounded, update_status,
};
use qgen_domain::{DomainError, Question, QuestionStatus, Validation, validate_question};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during review actions
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ReviewError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReviewError::Domain(DomainError::QuestionNotFound(_)))
    }
}

/// Use case for reviewer actions on stored questions
pub struct ReviewQuestionsUseCase {
    repository: Arc<dyn QuestionRepository>,
}

impl ReviewQuestionsUseCase {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    fn apply<T>(
        &self,
        mutate: impl FnOnce(&mut Vec<Question>) -> Result<T, DomainError>,
    ) -> Result<T, ReviewError> {
        let mut questions = self.repository.load_questions()?;
        let result = mutate(&mut questions)?;
        self.repository.save_questions(&questions)?;
        Ok(result)
    }

    /// Like [`apply`](Self::apply), retrying on the historical list when the
    /// working list has no such question
    fn apply_either<T>(
        &self,
        mutate: impl Fn(&mut Vec<Question>) -> Result<T, DomainError>,
    ) -> Result<T, ReviewError> {
        let mut questions = self.repository.load_questions()?;
        match mutate(&mut questions) {
            Ok(result) => {
                self.repository.save_questions(&questions)?;
                Ok(result)
            }
            Err(DomainError::QuestionNotFound(_)) => {
                let mut historical = self.repository.load_historical()?;
                let result = mutate(&mut historical)?;
                self.repository.save_historical(&historical)?;
                debug!("Updated historical question");
                Ok(result)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn accept(&self, id: &str) -> Result<(), ReviewError> {
        self.apply_either(|qs| update_status(qs, id, QuestionStatus::Accepted, None))?;
        info!("Accepted {}", id);
        Ok(())
    }

    pub fn reject(&self, id: &str, reason: Option<String>) -> Result<(), ReviewError> {
        self.apply_either(|qs| update_status(qs, id, QuestionStatus::Rejected, reason.clone()))?;
        info!("Rejected {}", id);
        Ok(())
    }

    /// Put a single variant back to pending
    pub fn reset(&self, id: &str) -> Result<(), ReviewError> {
        self.apply_either(|qs| update_status(qs, id, QuestionStatus::Pending, None))
    }

    /// Remove a variant from whichever lists hold it
    pub fn delete(&self, id: &str) -> Result<Question, ReviewError> {
        let mut questions = self.repository.load_questions()?;
        let mut historical = self.repository.load_historical()?;

        let from_working = delete_question(&mut questions, id).ok();
        let from_history = delete_question(&mut historical, id).ok();
        if from_working.is_some() {
            self.repository.save_questions(&questions)?;
        }
        if from_history.is_some() {
            self.repository.save_historical(&historical)?;
        }

        let removed = from_working
            .or(from_history)
            .ok_or_else(|| DomainError::QuestionNotFound(id.to_string()))?;
        info!("Deleted {}", id);
        Ok(removed)
    }

    /// Return every variant of `unique_id` to the review queue, in both lists
    pub fn kick_back(&self, unique_id: &str) -> Result<usize, ReviewError> {
        let mut questions = self.repository.load_questions()?;
        let mut historical = self.repository.load_historical()?;

        let working = kick_back(&mut questions, unique_id).unwrap_or(0);
        let past = kick_back(&mut historical, unique_id).unwrap_or(0);
        if working + past == 0 {
            return Err(DomainError::QuestionNotFound(unique_id.to_string()).into());
        }
        if working > 0 {
            self.repository.save_questions(&questions)?;
        }
        if past > 0 {
            self.repository.save_historical(&historical)?;
        }

        let touched = working + past;
        info!("Kicked back {} variant(s) of {}", touched, unique_id);
        Ok(touched)
    }

    pub fn clear_pending(&self) -> Result<usize, ReviewError> {
        let removed = self.apply(|qs| Ok(clear_pending(qs)))?;
        info!("Cleared {} pending question(s)", removed);
        Ok(removed)
    }

    /// Accept human-verified questions scoring at least `threshold`
    /// (70 when `None`)
    pub fn accept_verified(&self, threshold: Option<u8>) -> Result<Vec<String>, ReviewError> {
        let threshold = threshold.unwrap_or(QUALITY_PASS_THRESHOLD);
        let ids = self.apply(|qs| Ok(accept_high_scores(qs, threshold)))?;
        info!("Accepted {} verified question(s)", ids.len());
        Ok(ids)
    }

    /// Grounding report for every working question, or only for `id`
    pub fn validate(&self, id: Option<&str>) -> Result<Vec<(Question, Validation)>, ReviewError> {
        let mut questions = self.repository.load_questions()?;
        if let Some(id) = id {
            questions.retain(|q| q.id == id);
            if questions.is_empty() {
                return Err(DomainError::QuestionNotFound(id.to_string()).into());
            }
        }
        Ok(questions
            .into_iter()
            .map(|q| {
                let verdict = validate_question(&q);
                (q, verdict)
            })
            .collect())
    }

    /// Reject pending questions whose sources fail a critical check
    pub fn reject_ungrounded(&self) -> Result<Vec<String>, ReviewError> {
        let ids = self.apply(|qs| Ok(reject_ungrounded(qs)))?;
        info!("Rejected {} ungrounded question(s)", ids.len());
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgen_domain::GenerationConfig;
    use std::sync::Mutex;

    struct MemoryRepository {
        questions: Mutex<Vec<Question>>,
        historical: Mutex<Vec<Question>>,
        saves: Mutex<usize>,
    }

    impl MemoryRepository {
        fn new(questions: Vec<Question>) -> Arc<Self> {
            Self::with_historical(questions, Vec::new())
        }

        fn with_historical(questions: Vec<Question>, historical: Vec<Question>) -> Arc<Self> {
            Arc::new(Self {
                questions: Mutex::new(questions),
                historical: Mutex::new(historical),
                saves: Mutex::new(0),
            })
        }

        fn stored(&self) -> Vec<Question> {
            self.questions.lock().unwrap().clone()
        }

        fn stored_historical(&self) -> Vec<Question> {
            self.historical.lock().unwrap().clone()
        }
    }

    impl QuestionRepository for MemoryRepository {
        fn load_questions(&self) -> Result<Vec<Question>, StoreError> {
            Ok(self.stored())
        }

        fn save_questions(&self, questions: &[Question]) -> Result<(), StoreError> {
            *self.saves.lock().unwrap() += 1;
            *self.questions.lock().unwrap() = questions.to_vec();
            Ok(())
        }

        fn load_historical(&self) -> Result<Vec<Question>, StoreError> {
            Ok(self.stored_historical())
        }

        fn save_historical(&self, questions: &[Question]) -> Result<(), StoreError> {
            *self.saves.lock().unwrap() += 1;
            *self.historical.lock().unwrap() = questions.to_vec();
            Ok(())
        }

        fn load_config(&self) -> Result<Option<GenerationConfig>, StoreError> {
            Ok(None)
        }

        fn save_config(&self, _config: &GenerationConfig) -> Result<(), StoreError> {
            Ok(())
        }

        fn factory_reset(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn sample() -> Vec<Question> {
        let mut verified = Question::new("4", "d", "Verified").with_status(QuestionStatus::Pending);
        verified.human_verified = true;
        verified.critique_score = Some(85);
        vec![
            Question::new("1", "a", "Q1").with_status(QuestionStatus::Rejected),
            Question::new("2", "a", "Q1 fr")
                .with_language("French")
                .with_status(QuestionStatus::Accepted),
            Question::new("3", "b", "Q2"),
            verified,
        ]
    }

    #[test]
    fn test_accept_and_reject_persist() {
        let repo = MemoryRepository::new(sample());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        review.accept("3").unwrap();
        review.reject("2", Some("Wrong answer".to_string())).unwrap();

        let stored = repo.stored();
        assert_eq!(stored[2].status, Some(QuestionStatus::Accepted));
        assert_eq!(stored[1].status, Some(QuestionStatus::Rejected));
        assert_eq!(stored[1].rejection_reason.as_deref(), Some("Wrong answer"));
    }

    #[test]
    fn test_unknown_id_does_not_save() {
        let repo = MemoryRepository::new(sample());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        let err = review.delete("nope").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(*repo.saves.lock().unwrap(), 0);
    }

    #[test]
    fn test_kick_back_resets_all_variants() {
        let repo = MemoryRepository::new(sample());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        assert_eq!(review.kick_back("a").unwrap(), 2);
        let stored = repo.stored();
        assert!(stored[0].is_pending() && stored[1].is_pending());
        assert_eq!(stored[0].rejection_reason, None);
    }

    #[test]
    fn test_clear_pending_and_accept_verified() {
        let repo = MemoryRepository::new(sample());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        assert_eq!(review.accept_verified(None).unwrap(), vec!["4".to_string()]);
        assert_eq!(review.clear_pending().unwrap(), 1);

        let ids: Vec<String> = repo.stored().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_reset_and_delete() {
        let repo = MemoryRepository::new(sample());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        review.reset("2").unwrap();
        assert!(repo.stored()[1].is_pending());

        let removed = review.delete("1").unwrap();
        assert_eq!(removed.question, "Q1");
        assert_eq!(repo.stored().len(), 3);
    }

    fn archive() -> Vec<Question> {
        vec![
            Question::new("h1", "a", "Q1 de")
                .with_language("German")
                .with_status(QuestionStatus::Accepted),
            Question::new("h2", "c", "Old question").with_status(QuestionStatus::Accepted),
        ]
    }

    #[test]
    fn test_status_change_falls_back_to_historical() {
        let repo = MemoryRepository::with_historical(sample(), archive());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        review.reject("h2", Some("Outdated".to_string())).unwrap();
        review.reset("h1").unwrap();

        let historical = repo.stored_historical();
        assert_eq!(historical[1].status, Some(QuestionStatus::Rejected));
        assert_eq!(historical[1].rejection_reason.as_deref(), Some("Outdated"));
        assert!(historical[0].is_pending());
        assert_eq!(repo.stored(), sample());

        assert!(review.accept("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_removes_from_historical() {
        let repo = MemoryRepository::with_historical(sample(), archive());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        let removed = review.delete("h2").unwrap();
        assert_eq!(removed.question, "Old question");
        assert_eq!(repo.stored_historical().len(), 1);
        assert_eq!(repo.stored().len(), 4);
    }

    #[test]
    fn test_kick_back_covers_both_lists() {
        let repo = MemoryRepository::with_historical(sample(), archive());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        assert_eq!(review.kick_back("a").unwrap(), 3);
        assert!(repo.stored_historical()[0].is_pending());
        assert_eq!(review.kick_back("c").unwrap(), 1);
        assert!(review.kick_back("zzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_validate_reports_and_rejects_ungrounded() {
        let repo = MemoryRepository::new(sample());
        let review = ReviewQuestionsUseCase::new(repo.clone());

        let report = review.validate(None).unwrap();
        assert_eq!(report.len(), 4);
        assert!(report.iter().all(|(_, v)| v.is_critical_failure));

        let single = review.validate(Some("3")).unwrap();
        assert_eq!(single[0].0.id, "3");
        assert!(review.validate(Some("missing")).unwrap_err().is_not_found());

        // only the pending ones change
        let rejected = review.reject_ungrounded().unwrap();
        assert_eq!(rejected, vec!["3".to_string(), "4".to_string()]);
        let stored = repo.stored();
        assert!(stored[2].is_rejected() && stored[3].is_rejected());
        assert_eq!(stored[1].status, Some(QuestionStatus::Accepted));
    }
}
