//! Question entity
//!
//! Field names serialize in camelCase so stored collections stay compatible
//! with the browser data format (`uniqueId`, `sourceExcerpt`, ...).

use super::category::{Category, Difficulty, QuestionType};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Language assumed for records that carry none
pub const DEFAULT_LANGUAGE: &str = "English";

/// Review status of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStatus::Pending => "pending",
            QuestionStatus::Accepted => "accepted",
            QuestionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(QuestionStatus::Pending),
            "accepted" => Ok(QuestionStatus::Accepted),
            "rejected" => Ok(QuestionStatus::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// A generated question (Entity)
///
/// All language variants of one logical question share `unique_id` but have
/// distinct `id` and `language`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Local key, distinct per language variant
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Logical identity shared across translations; missing on malformed records
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub question: String,
    /// Answer options keyed by letter (`A`..`D`)
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Correct option letter
    #[serde(default)]
    pub correct: String,
    #[serde(default)]
    pub discipline: String,
    /// Either a level (`Easy`) or a combined category (`Easy MC`)
    #[serde(default)]
    pub difficulty: String,
    #[serde(default, rename = "type")]
    pub question_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub status: Option<QuestionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critique_score: Option<u8>,
    /// Reviewer-model commentary behind `critique_score`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critique: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
    #[serde(default)]
    pub human_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Browser records use numeric ids (`Date.now() + random`); accept both.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

impl Question {
    /// Create a pending question with the given ids and text
    pub fn new(id: impl Into<String>, unique_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unique_id: Some(unique_id.into()),
            question: text.into(),
            status: Some(QuestionStatus::Pending),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_status(mut self, status: QuestionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_discipline(mut self, discipline: impl Into<String>) -> Self {
        self.discipline = discipline.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_type(mut self, question_type: QuestionType) -> Self {
        self.question_type = Some(question_type.as_str().to_string());
        self
    }

    pub fn with_creator(mut self, creator_name: impl Into<String>) -> Self {
        self.creator_name = Some(creator_name.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Key used to group language variants; falls back to `id` when the
    /// record has no `uniqueId`
    pub fn group_key(&self) -> &str {
        self.unique_id.as_deref().unwrap_or(&self.id)
    }

    /// Display language, defaulting to English
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Effective status; a missing status counts as pending
    pub fn effective_status(&self) -> QuestionStatus {
        self.status.unwrap_or(QuestionStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        self.effective_status() == QuestionStatus::Pending
    }

    pub fn is_rejected(&self) -> bool {
        self.status == Some(QuestionStatus::Rejected)
    }

    /// Parsed difficulty level, if the record's difficulty is recognizable
    pub fn difficulty_level(&self) -> Option<Difficulty> {
        if let Ok(category) = self.difficulty.parse::<Category>() {
            return Some(category.difficulty);
        }
        self.difficulty.parse().ok()
    }

    /// Parsed question type, from a combined difficulty or the `type` field
    pub fn parsed_type(&self) -> Option<QuestionType> {
        if let Ok(category) = self.difficulty.parse::<Category>() {
            return Some(category.question_type);
        }
        self.question_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// Resolved quota category, or `None` when level or type is unknown
    pub fn category(&self) -> Option<Category> {
        if let Ok(category) = self.difficulty.parse::<Category>() {
            return Some(category);
        }
        let level = self.difficulty.parse::<Difficulty>().ok()?;
        let kind = self.question_type.as_deref()?.parse::<QuestionType>().ok()?;
        Some(Category::new(level, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_falls_back_to_id() {
        let mut q = Question::new("local-1", "u-1", "What is Nanite?");
        assert_eq!(q.group_key(), "u-1");
        q.unique_id = None;
        assert_eq!(q.group_key(), "local-1");
    }

    #[test]
    fn test_missing_status_is_pending() {
        let mut q = Question::new("1", "u", "Q");
        q.status = None;
        assert!(q.is_pending());
        assert_eq!(q.effective_status(), QuestionStatus::Pending);
        assert!(!q.is_rejected());
    }

    #[test]
    fn test_language_defaults_to_english() {
        let q = Question::new("1", "u", "Q");
        assert_eq!(q.language(), "English");
        assert_eq!(q.with_language("French").language(), "French");
    }

    #[test]
    fn test_category_from_combined_difficulty() {
        let q = Question::new("1", "u", "Q").with_difficulty("Hard T/F");
        assert_eq!(
            q.category(),
            Some(Category::new(Difficulty::Hard, QuestionType::TrueFalse))
        );
    }

    #[test]
    fn test_category_from_level_and_type() {
        let q = Question::new("1", "u", "Q")
            .with_difficulty("Beginner")
            .with_type(QuestionType::MultipleChoice);
        assert_eq!(
            q.category(),
            Some(Category::new(Difficulty::Easy, QuestionType::MultipleChoice))
        );
    }

    #[test]
    fn test_category_unknown_without_type() {
        let q = Question::new("1", "u", "Q").with_difficulty("Easy");
        assert_eq!(q.category(), None);
        assert_eq!(q.difficulty_level(), Some(Difficulty::Easy));
    }

    #[test]
    fn test_deserialize_browser_record() {
        let json = r#"{
            "id": 1717000000.5,
            "uniqueId": "abc",
            "question": "Which system renders <b>Nanite</b> meshes?",
            "options": {"A": "Lumen", "B": "Nanite", "C": "", "D": ""},
            "correct": "B",
            "discipline": "Technical Art",
            "type": "Multiple Choice",
            "difficulty": "Easy",
            "status": "accepted",
            "sourceExcerpt": "Nanite is a virtualized geometry system",
            "unknownField": 42
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "1717000000.5");
        assert_eq!(q.group_key(), "abc");
        assert_eq!(q.status, Some(QuestionStatus::Accepted));
        assert_eq!(q.options.get("B").map(String::as_str), Some("Nanite"));
        assert_eq!(q.category().unwrap().to_string(), "Easy MC");
        assert!(q.tags.is_empty());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let q = Question::new("1", "u-1", "Q").with_creator("Sam");
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["uniqueId"], "u-1");
        assert_eq!(value["creatorName"], "Sam");
        assert_eq!(value["status"], "pending");
        assert!(value.get("rejectionReason").is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Accepted".parse::<QuestionStatus>().unwrap(), QuestionStatus::Accepted);
        assert!("maybe".parse::<QuestionStatus>().is_err());
    }
}
