//! Status stage and tab counts

use super::criteria::StatusFilter;
use crate::question::{Question, QuestionStatus};
use serde::Serialize;

/// Apply the status filter to an already context-filtered list
pub fn filtered_questions(questions: &[Question], filter: StatusFilter) -> Vec<Question> {
    questions.iter().filter(|q| filter.matches(q)).cloned().collect()
}

/// Per-tab counts derived from the context-filtered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub all: usize,
}

impl StatusCounts {
    pub fn from_questions(questions: &[Question]) -> Self {
        questions.iter().fold(Self::default(), |mut counts, q| {
            match q.effective_status() {
                QuestionStatus::Pending => counts.pending += 1,
                QuestionStatus::Accepted => counts.accepted += 1,
                QuestionStatus::Rejected => counts.rejected += 1,
            }
            counts.all += 1;
            counts
        })
    }

    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::Pending => self.pending,
            StatusFilter::Accepted => self.accepted,
            StatusFilter::Rejected => self.rejected,
            StatusFilter::All => self.all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Question> {
        let mut no_status = Question::new("1", "a", "Q");
        no_status.status = None;
        vec![
            no_status,
            Question::new("2", "b", "Q"),
            Question::new("3", "c", "Q").with_status(QuestionStatus::Accepted),
            Question::new("4", "d", "Q").with_status(QuestionStatus::Rejected),
        ]
    }

    #[test]
    fn test_pending_includes_missing_status() {
        let result = filtered_questions(&sample(), StatusFilter::Pending);
        let ids: Vec<&str> = result.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_exact_status_and_all() {
        let questions = sample();
        assert_eq!(filtered_questions(&questions, StatusFilter::Accepted).len(), 1);
        assert_eq!(filtered_questions(&questions, StatusFilter::Rejected).len(), 1);
        assert_eq!(filtered_questions(&questions, StatusFilter::All), questions);
    }

    #[test]
    fn test_counts_independent_of_active_tab() {
        let counts = StatusCounts::from_questions(&sample());
        assert_eq!(
            counts,
            StatusCounts {
                pending: 2,
                accepted: 1,
                rejected: 1,
                all: 4
            }
        );
        for filter in StatusFilter::ALL {
            assert_eq!(counts.get(filter), filtered_questions(&sample(), filter).len());
        }
    }

    #[test]
    fn test_empty_is_not_an_error() {
        assert!(filtered_questions(&[], StatusFilter::Pending).is_empty());
        assert_eq!(StatusCounts::from_questions(&[]), StatusCounts::default());
    }
}
