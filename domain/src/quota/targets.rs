//! Quota targets

use serde::{Deserialize, Serialize};

/// Default total number of live (non-rejected) questions
pub const TARGET_TOTAL: usize = 200;

/// Default number of live questions per category
pub const TARGET_PER_CATEGORY: usize = 33;

/// What a per-category count ranges over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaScope {
    /// Count the category across every discipline
    #[default]
    Category,
    /// Count the category within the requested discipline only
    Discipline,
}

/// Configured generation targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaTargets {
    pub total: usize,
    pub per_category: usize,
    pub scope: QuotaScope,
}

impl Default for QuotaTargets {
    fn default() -> Self {
        Self {
            total: TARGET_TOTAL,
            per_category: TARGET_PER_CATEGORY,
            scope: QuotaScope::Category,
        }
    }
}

impl QuotaTargets {
    pub fn new(total: usize, per_category: usize) -> Self {
        Self {
            total,
            per_category,
            scope: QuotaScope::Category,
        }
    }

    pub fn with_scope(mut self, scope: QuotaScope) -> Self {
        self.scope = scope;
        self
    }
}
