//! Quota targets from TOML (`[quota]` section)

use qgen_domain::quota::{TARGET_PER_CATEGORY, TARGET_TOTAL};
use qgen_domain::{QuotaScope, QuotaTargets};
use serde::{Deserialize, Serialize};

/// Raw quota configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuotaConfig {
    /// Live questions allowed overall
    pub total: usize,
    /// Live questions allowed per difficulty × type category
    pub per_category: usize,
    /// `"category"` counts across disciplines, `"discipline"` within one
    pub scope: QuotaScope,
}

impl Default for FileQuotaConfig {
    fn default() -> Self {
        Self {
            total: TARGET_TOTAL,
            per_category: TARGET_PER_CATEGORY,
            scope: QuotaScope::Category,
        }
    }
}

impl FileQuotaConfig {
    pub fn to_targets(&self) -> QuotaTargets {
        QuotaTargets::new(self.total, self.per_category).with_scope(self.scope)
    }
}
