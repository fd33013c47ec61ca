//! Quota reporting
//!
//! Read-only summaries used by the `quota` command and progress displays.

use super::check::{live_in_category, live_total};
use super::targets::QuotaTargets;
use crate::question::{Category, Question};
use serde::Serialize;
use std::collections::BTreeMap;

/// Progress of one bucket toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaEntry {
    pub current: usize,
    pub target: usize,
    pub remaining: usize,
    pub is_full: bool,
    /// Rounded percentage of the target; 100 when the target is zero
    pub percentage: u32,
}

impl QuotaEntry {
    pub fn new(current: usize, target: usize) -> Self {
        let percentage = if target == 0 {
            100
        } else {
            ((current as f64 / target as f64) * 100.0).round() as u32
        };
        Self {
            current,
            target,
            remaining: target.saturating_sub(current),
            is_full: current >= target,
            percentage,
        }
    }
}

/// Quota status for every category plus the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaStatus {
    pub categories: BTreeMap<Category, QuotaEntry>,
    pub total: QuotaEntry,
}

/// Live questions per category (all six keys present)
pub fn category_counts(questions: &[Question]) -> BTreeMap<Category, usize> {
    Category::all()
        .into_iter()
        .map(|c| (c, live_in_category(questions, c, None)))
        .collect()
}

/// Live questions per discipline and raw difficulty string
///
/// Missing values are reported under `Unknown`.
pub fn discipline_counts(questions: &[Question]) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for q in questions.iter().filter(|q| !q.is_rejected()) {
        let discipline = non_empty_or_unknown(&q.discipline);
        let difficulty = non_empty_or_unknown(&q.difficulty);
        *counts
            .entry(discipline)
            .or_default()
            .entry(difficulty)
            .or_insert(0) += 1;
    }
    counts
}

fn non_empty_or_unknown(s: &str) -> String {
    if s.trim().is_empty() {
        "Unknown".to_string()
    } else {
        s.to_string()
    }
}

/// Remaining slots in `category` (0 when full)
pub fn remaining_quota(category: Category, questions: &[Question], targets: &QuotaTargets) -> usize {
    targets
        .per_category
        .saturating_sub(live_in_category(questions, category, None))
}

pub fn is_category_full(category: Category, questions: &[Question], targets: &QuotaTargets) -> bool {
    remaining_quota(category, questions, targets) == 0
}

pub fn is_total_quota_met(questions: &[Question], targets: &QuotaTargets) -> bool {
    live_total(questions) >= targets.total
}

/// Full quota report
pub fn quota_status(questions: &[Question], targets: &QuotaTargets) -> QuotaStatus {
    let categories = category_counts(questions)
        .into_iter()
        .map(|(c, current)| (c, QuotaEntry::new(current, targets.per_category)))
        .collect();
    QuotaStatus {
        categories,
        total: QuotaEntry::new(live_total(questions), targets.total),
    }
}
