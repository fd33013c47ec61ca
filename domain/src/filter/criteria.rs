//! Status filter value object

use crate::core::error::DomainError;
use crate::question::{Question, QuestionStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status tab selected in the question list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Pending or missing status
    #[default]
    Pending,
    Accepted,
    Rejected,
    /// No status filtering
    All,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::Pending,
        StatusFilter::Accepted,
        StatusFilter::Rejected,
        StatusFilter::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Pending => "pending",
            StatusFilter::Accepted => "accepted",
            StatusFilter::Rejected => "rejected",
            StatusFilter::All => "all",
        }
    }

    /// Whether `question` passes this filter
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => question.is_pending(),
            StatusFilter::Accepted => question.status == Some(QuestionStatus::Accepted),
            StatusFilter::Rejected => question.status == Some(QuestionStatus::Rejected),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(StatusFilter::Pending),
            "accepted" => Ok(StatusFilter::Accepted),
            "rejected" => Ok(StatusFilter::Rejected),
            "all" => Ok(StatusFilter::All),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_matches_missing_status() {
        let mut q = Question::new("1", "u", "Q");
        q.status = None;
        assert!(StatusFilter::Pending.matches(&q));
        assert!(!StatusFilter::Accepted.matches(&q));
        assert!(StatusFilter::All.matches(&q));
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("archived".parse::<StatusFilter>().is_err());
        let json = serde_json::to_string(&StatusFilter::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
        assert_eq!(StatusFilter::default(), StatusFilter::Pending);
    }
}
