//! Application-level configuration.
//!
//! Controls how the use cases behave: request timeout, quota targets and
//! the near-duplicate threshold used when storing new questions.

use qgen_domain::{DUPLICATE_THRESHOLD, QuotaTargets};
use std::time::Duration;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a generator response.
    pub timeout: Option<Duration>,
    /// Generation targets enforced before every batch.
    pub quota: QuotaTargets,
    /// Similarity at or above which a new question is treated as a duplicate.
    pub duplicate_threshold: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            quota: QuotaTargets::default(),
            duplicate_threshold: DUPLICATE_THRESHOLD,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
            ..Default::default()
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Default::default()
        }
    }

    pub fn with_quota(mut self, quota: QuotaTargets) -> Self {
        self.quota = quota;
        self
    }
}
