//! View state for the question list

pub mod mode;
pub mod state;

pub use mode::AppMode;
pub use state::{
    PREF_FILTER_KEY, PREF_HISTORY_KEY, PREF_SEARCH_KEY, PersistedPreferences, ViewAction, ViewState,
    reduce,
};
