//! View preferences and their reducer
//!
//! All list preferences live in one [`ViewState`]; every change goes through
//! [`reduce`], which is pure. Persistence of the durable subset
//! ([`PersistedPreferences`]) is left to the caller.

use crate::filter::{SortKey, StatusFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Store key for the persisted search term
pub const PREF_SEARCH_KEY: &str = "ue5_pref_search";
/// Store key for the persisted status filter
pub const PREF_FILTER_KEY: &str = "ue5_pref_filter";
/// Store key for the persisted history toggle
pub const PREF_HISTORY_KEY: &str = "ue5_pref_history";

/// Durable subset of the view preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedPreferences {
    pub search_term: String,
    pub filter_mode: StatusFilter,
    pub show_history: bool,
}

/// Preferences driving the question list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub filter_mode: StatusFilter,
    pub show_history: bool,
    pub filter_by_creator: bool,
    pub filter_tags: BTreeSet<String>,
    pub sort_by: SortKey,
    /// Index into the unique list; clamped by the owner of the list
    pub review_cursor: usize,
}

impl ViewState {
    pub fn persisted(&self) -> PersistedPreferences {
        PersistedPreferences {
            search_term: self.search_term.clone(),
            filter_mode: self.filter_mode,
            show_history: self.show_history,
        }
    }

    /// Clamp the cursor to a list of `len` entries
    pub fn clamp_cursor(&mut self, len: usize) {
        self.review_cursor = self.review_cursor.min(len.saturating_sub(1));
    }
}

/// A preference transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetSearchTerm(String),
    SetFilterMode(StatusFilter),
    SetShowHistory(bool),
    SetFilterByCreator(bool),
    ToggleTag(String),
    SetTags(BTreeSet<String>),
    ClearTags,
    SetSortBy(SortKey),
    NextQuestion,
    PreviousQuestion,
    JumpTo(usize),
    /// Discipline, difficulty, language or app mode changed
    ContextChanged,
    Restore(PersistedPreferences),
}

/// Apply `action` to `state`
///
/// The review cursor returns to 0 when the search term, filter mode or
/// context actually changes.
pub fn reduce(state: &ViewState, action: ViewAction) -> ViewState {
    let mut next = state.clone();
    match action {
        ViewAction::SetSearchTerm(term) => {
            if term != next.search_term {
                next.search_term = term;
                next.review_cursor = 0;
            }
        }
        ViewAction::SetFilterMode(mode) => {
            if mode != next.filter_mode {
                next.filter_mode = mode;
                next.review_cursor = 0;
            }
        }
        ViewAction::SetShowHistory(show) => next.show_history = show,
        ViewAction::SetFilterByCreator(on) => next.filter_by_creator = on,
        ViewAction::ToggleTag(tag) => {
            if !next.filter_tags.remove(&tag) {
                next.filter_tags.insert(tag);
            }
        }
        ViewAction::SetTags(tags) => next.filter_tags = tags,
        ViewAction::ClearTags => next.filter_tags.clear(),
        ViewAction::SetSortBy(key) => next.sort_by = key,
        ViewAction::NextQuestion => next.review_cursor = next.review_cursor.saturating_add(1),
        ViewAction::PreviousQuestion => next.review_cursor = next.review_cursor.saturating_sub(1),
        ViewAction::JumpTo(index) => next.review_cursor = index,
        ViewAction::ContextChanged => next.review_cursor = 0,
        ViewAction::Restore(prefs) => {
            if prefs.search_term != next.search_term || prefs.filter_mode != next.filter_mode {
                next.review_cursor = 0;
            }
            next.search_term = prefs.search_term;
            next.filter_mode = prefs.filter_mode;
            next.show_history = prefs.show_history;
        }
    }
    next
}
