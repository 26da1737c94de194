use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::DeckError;

/// Preference key for the persisted grid/list choice.
pub const VIEW_MODE_KEY: &str = "view_mode";

/// Small key-value port for durable preferences. Reads are best-effort and
/// infallible; only writes can fail, and callers surface that as a toast.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DeckError>;
}

/// In-memory store for tests and hosts without a config directory.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DeckError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file under the user config dir. A missing or unreadable file just
/// means empty preferences.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePreferences {
    /// Open the default store at `<config dir>/assetdeck/prefs.json`, or
    /// `None` when the platform has no config directory.
    pub fn open_default() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::open(dir.join("assetdeck").join("prefs.json")))
    }

    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                debug!(?path, %err, "preference file unparsable, starting empty");
                HashMap::new()
            }),
            Err(err) => {
                debug!(?path, %err, "preference file unreadable, starting empty");
                HashMap::new()
            }
        };
        Self { path, values }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DeckError> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| DeckError::PrefWrite {
                path: self.path.clone(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(&self.values).unwrap_or_default();
        fs::write(&self.path, text).map_err(|source| DeckError::PrefWrite {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.get(VIEW_MODE_KEY), None);
        prefs.set(VIEW_MODE_KEY, "list").unwrap();
        assert_eq!(prefs.get(VIEW_MODE_KEY).as_deref(), Some("list"));
        prefs.set(VIEW_MODE_KEY, "grid").unwrap();
        assert_eq!(prefs.get(VIEW_MODE_KEY).as_deref(), Some("grid"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("assetdeck-prefs-{}", std::process::id()));
        let path = dir.join("prefs.json");
        let _ = fs::remove_file(&path);

        let mut prefs = FilePreferences::open(path.clone());
        assert_eq!(prefs.get(VIEW_MODE_KEY), None);
        prefs.set(VIEW_MODE_KEY, "list").unwrap();

        let reopened = FilePreferences::open(path.clone());
        assert_eq!(reopened.get(VIEW_MODE_KEY).as_deref(), Some("list"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = std::env::temp_dir().join(format!("assetdeck-prefs-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let prefs = FilePreferences::open(path);
        assert_eq!(prefs.get(VIEW_MODE_KEY), None);

        let _ = fs::remove_dir_all(&dir);
    }
}
