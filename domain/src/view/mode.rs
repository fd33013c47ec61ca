//! Application mode

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which screen the question list is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Create,
    Review,
    Database,
    Analytics,
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Create => "create",
            AppMode::Review => "review",
            AppMode::Database => "database",
            AppMode::Analytics => "analytics",
        }
    }

    /// Create and review always show historical questions
    pub fn forces_history(&self) -> bool {
        matches!(self, AppMode::Create | AppMode::Review)
    }

    /// Review browses every difficulty
    pub fn filters_difficulty(&self) -> bool {
        !matches!(self, AppMode::Review)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(AppMode::Create),
            "review" => Ok(AppMode::Review),
            "database" | "db" => Ok(AppMode::Database),
            "analytics" => Ok(AppMode::Analytics),
            _ => Err(DomainError::InvalidAppMode(s.to_string())),
        }
    }
}
