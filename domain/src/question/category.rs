//! Difficulty / question-type categories
//!
//! Generation targets and quota buckets are expressed as a [`Category`]:
//! a difficulty level paired with a question type, written `Easy MC`,
//! `Hard T/F`, and so on. The generation settings additionally allow
//! `Balanced All`, which spreads a batch over every category.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Difficulty level of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "beginner" => Ok(Difficulty::Easy),
            "medium" | "intermediate" => Ok(Difficulty::Medium),
            "hard" | "expert" => Ok(Difficulty::Hard),
            _ => Err(DomainError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Question format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::MultipleChoice, QuestionType::TrueFalse];

    /// Long name as stored on question records
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
        }
    }

    /// Short name used in category keys
    pub fn short(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MC",
            QuestionType::TrueFalse => "T/F",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mc" | "multiple choice" => Ok(QuestionType::MultipleChoice),
            "t/f" | "tf" | "true/false" => Ok(QuestionType::TrueFalse),
            _ => Err(DomainError::InvalidQuestionType(s.to_string())),
        }
    }
}

impl Serialize for QuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A quota bucket: difficulty × question type (e.g. `Easy MC`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
}

impl Category {
    pub fn new(difficulty: Difficulty, question_type: QuestionType) -> Self {
        Self {
            difficulty,
            question_type,
        }
    }

    /// The six category keys in display order
    pub fn all() -> Vec<Category> {
        Difficulty::ALL
            .iter()
            .flat_map(|d| QuestionType::ALL.iter().map(|t| Category::new(*d, *t)))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.difficulty, self.question_type.short())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (level, kind) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| DomainError::InvalidDifficulty(s.to_string()))?;
        let difficulty = level.parse::<Difficulty>()?;
        let question_type = kind
            .trim()
            .parse::<QuestionType>()
            .map_err(|_| DomainError::InvalidDifficulty(s.to_string()))?;
        Ok(Category::new(difficulty, question_type))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Difficulty selected for generation and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultySetting {
    /// Spread the batch over every category; exempt from per-category caps
    Balanced,
    /// A single category
    Category(Category),
}

impl DifficultySetting {
    pub fn is_balanced(&self) -> bool {
        matches!(self, DifficultySetting::Balanced)
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            DifficultySetting::Balanced => None,
            DifficultySetting::Category(c) => Some(*c),
        }
    }
}

impl Default for DifficultySetting {
    fn default() -> Self {
        DifficultySetting::Category(Category::new(Difficulty::Easy, QuestionType::MultipleChoice))
    }
}

impl fmt::Display for DifficultySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultySetting::Balanced => f.write_str("Balanced All"),
            DifficultySetting::Category(c) => c.fmt(f),
        }
    }
}

impl FromStr for DifficultySetting {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" | "balanced all" => Ok(DifficultySetting::Balanced),
            _ => s.parse::<Category>().map(DifficultySetting::Category),
        }
    }
}

impl Serialize for DifficultySetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DifficultySetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
