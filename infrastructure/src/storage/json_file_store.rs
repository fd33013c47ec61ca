//! Directory-backed key/value store.
//!
//! Every key is one pretty-printed JSON file (`<key>.json`) in the data
//! directory. Writes go to a sibling temp file that is renamed over the
//! target, so a crash never leaves a half-written file behind.

use qgen_application::ports::preference_store::PreferenceStore;
use qgen_application::ports::question_repository::{
    CONFIG_KEY, HISTORY_KEY, QUESTIONS_KEY, QuestionRepository, StoreError,
};
use qgen_domain::view::{PREF_FILTER_KEY, PREF_HISTORY_KEY, PREF_SEARCH_KEY};
use qgen_domain::{GenerationConfig, PersistedPreferences, Question};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Every key this store writes
const ALL_KEYS: [&str; 6] = [
    QUESTIONS_KEY,
    HISTORY_KEY,
    CONFIG_KEY,
    PREF_SEARCH_KEY,
    PREF_FILTER_KEY,
    PREF_HISTORY_KEY,
];

/// JSON-file store implementing both storage ports
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(self.path(key)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(key, e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, e.to_string()))
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e.to_string()))?;

        let json =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::corrupt(key, e.to_string()))?;
        let target = self.path(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        fs::write(&tmp, json).map_err(|e| StoreError::io(key, e.to_string()))?;
        fs::rename(&tmp, &target).map_err(|e| StoreError::io(key, e.to_string()))?;
        debug!("Wrote {}", target.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e.to_string())),
        }
    }
}

impl QuestionRepository for JsonFileStore {
    fn load_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.read(QUESTIONS_KEY)?.unwrap_or_default())
    }

    fn save_questions(&self, questions: &[Question]) -> Result<(), StoreError> {
        self.write(QUESTIONS_KEY, questions)
    }

    fn load_historical(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.read(HISTORY_KEY)?.unwrap_or_default())
    }

    fn save_historical(&self, questions: &[Question]) -> Result<(), StoreError> {
        self.write(HISTORY_KEY, questions)
    }

    fn load_config(&self) -> Result<Option<GenerationConfig>, StoreError> {
        self.read(CONFIG_KEY)
    }

    fn save_config(&self, config: &GenerationConfig) -> Result<(), StoreError> {
        self.write(CONFIG_KEY, config)
    }

    fn factory_reset(&self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.remove(key)?;
        }
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<PersistedPreferences, StoreError> {
        let defaults = PersistedPreferences::default();
        Ok(PersistedPreferences {
            search_term: self.read(PREF_SEARCH_KEY)?.unwrap_or(defaults.search_term),
            filter_mode: self.read(PREF_FILTER_KEY)?.unwrap_or(defaults.filter_mode),
            show_history: self.read(PREF_HISTORY_KEY)?.unwrap_or(defaults.show_history),
        })
    }

    fn save(&self, preferences: &PersistedPreferences) -> Result<(), StoreError> {
        self.write(PREF_SEARCH_KEY, &preferences.search_term)?;
        self.write(PREF_FILTER_KEY, &preferences.filter_mode)?;
        self.write(PREF_HISTORY_KEY, &preferences.show_history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgen_domain::{QuestionStatus, StatusFilter};

    fn store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn test_missing_keys_read_as_empty() {
        let (_dir, store) = store();
        assert!(store.load_questions().unwrap().is_empty());
        assert!(store.load_historical().unwrap().is_empty());
        assert!(store.load_config().unwrap().is_none());
        assert_eq!(
            PreferenceStore::load(&store).unwrap(),
            PersistedPreferences::default()
        );
    }

    #[test]
    fn test_questions_persist_across_instances() {
        let (dir, store) = store();
        let questions = vec![
            Question::new("1", "u-1", "What is <b>Nanite</b>?").with_status(QuestionStatus::Accepted),
            Question::new("2", "u-1", "Qu'est-ce que Nanite ?").with_language("French"),
        ];
        store.save_questions(&questions).unwrap();

        let reopened = JsonFileStore::new(dir.path().join("data"));
        let loaded = reopened.load_questions().unwrap();
        assert_eq!(loaded, questions);
        assert!(!dir.path().join("data").join(".ue5_gen_questions.json.tmp").exists());
    }

    #[test]
    fn test_browser_export_with_numeric_ids_loads() {
        let (dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            dir.path().join("data").join("ue5_gen_questions.json"),
            r#"[{"id": 1718000000123.5, "uniqueId": "u-9", "question": "Legacy", "status": "accepted"}]"#,
        )
        .unwrap();

        let loaded = store.load_questions().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].group_key(), "u-9");
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path(HISTORY_KEY), "{not json").unwrap();

        let err = store.load_historical().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == HISTORY_KEY));
    }

    #[test]
    fn test_config_round_trip() {
        let (_dir, store) = store();
        let config = GenerationConfig {
            discipline: "Animation".to_string(),
            creator_name: "Sam".to_string(),
            ..Default::default()
        };
        store.save_config(&config).unwrap();
        assert_eq!(store.load_config().unwrap(), Some(config));
    }

    #[test]
    fn test_preferences_use_separate_keys() {
        let (_dir, store) = store();
        let prefs = PersistedPreferences {
            search_term: "lumen".to_string(),
            filter_mode: StatusFilter::Rejected,
            show_history: true,
        };
        PreferenceStore::save(&store, &prefs).unwrap();

        assert_eq!(fs::read_to_string(store.path(PREF_FILTER_KEY)).unwrap(), "\"rejected\"");
        assert_eq!(PreferenceStore::load(&store).unwrap(), prefs);
    }

    #[test]
    fn test_factory_reset_clears_everything() {
        let (_dir, store) = store();
        store.save_questions(&[Question::new("1", "u", "Q")]).unwrap();
        store.save_historical(&[Question::new("h", "uh", "H")]).unwrap();
        PreferenceStore::save(
            &store,
            &PersistedPreferences {
                show_history: true,
                ..Default::default()
            },
        )
        .unwrap();

        store.factory_reset().unwrap();
        assert!(store.load_questions().unwrap().is_empty());
        assert!(store.load_historical().unwrap().is_empty());
        assert!(!PreferenceStore::load(&store).unwrap().show_history);

        // resetting an empty store is fine
        store.factory_reset().unwrap();
    }
}
