//! Preference store port
//!
//! Durable storage for the list preferences that survive restarts
//! (search term, status tab, history toggle).

use super::question_repository::StoreError;
use qgen_domain::PersistedPreferences;

/// Storage for [`PersistedPreferences`]
pub trait PreferenceStore: Send + Sync {
    /// Load stored preferences; missing keys fall back to defaults
    fn load(&self) -> Result<PersistedPreferences, StoreError>;

    fn save(&self, preferences: &PersistedPreferences) -> Result<(), StoreError>;
}

/// Store that remembers nothing
pub struct NoPreferenceStore;

impl PreferenceStore for NoPreferenceStore {
    fn load(&self) -> Result<PersistedPreferences, StoreError> {
        Ok(PersistedPreferences::default())
    }

    fn save(&self, _preferences: &PersistedPreferences) -> Result<(), StoreError> {
        Ok(())
    }
}
