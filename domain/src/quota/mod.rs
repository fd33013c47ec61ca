//! Quota enforcement
//!
//! Generation is capped per category and in total. [`check::validate_generation`]
//! gates each generation attempt; [`status`] reports progress toward the
//! targets.

pub mod batch;
pub mod check;
pub mod status;
pub mod targets;

pub use batch::BatchSize;
pub use check::{IMBALANCE_THRESHOLD, QuotaCheck, QuotaLimit, type_counts, validate_generation};
pub use status::{
    QuotaEntry, QuotaStatus, category_counts, discipline_counts, is_category_full,
    is_total_quota_met, quota_status, remaining_quota,
};
pub use targets::{QuotaScope, QuotaTargets, TARGET_PER_CATEGORY, TARGET_TOTAL};
