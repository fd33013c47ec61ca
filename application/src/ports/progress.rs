//! Progress notification port
//!
//! Defines the interface for reporting progress during generation and
//! translation requests.

use qgen_domain::QuotaCheck;

/// Callback for progress updates during a generator round trip
///
/// Implementations live in the presentation layer.
pub trait GenerationProgress: Send + Sync {
    /// Called after the quota gate ran
    fn on_quota_checked(&self, _check: &QuotaCheck) {}

    /// Called right before the request is sent
    fn on_request_start(&self, label: &str);

    /// Called when the request finished, successfully or not
    fn on_request_complete(&self, success: bool);

    /// Called once new questions were stored
    fn on_questions_added(&self, _count: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {
    fn on_request_start(&self, _label: &str) {}
    fn on_request_complete(&self, _success: bool) {}
}
