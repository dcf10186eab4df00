use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, info};

use super::{KeyValueStore, StoreError};

/// Key/value store persisted as one JSON object on disk.
/// Every write rewrites the whole document; memory only changes once the
/// document is on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Loads the document at `path`, or starts empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No state file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let doc = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, doc)?;
        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Applies `change` to a copy, persists it, then swaps it in.
    fn commit(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value);
            true
        })
    }

    fn set_many(&self, batch: Vec<(&str, String)>) -> Result<(), StoreError> {
        self.commit(|entries| {
            for (key, value) in batch {
                entries.insert(key.to_string(), value);
            }
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.commit(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get("lastResumeScore").is_none());
        store.set("lastResumeScore", "78".to_string()).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("lastResumeScore").as_deref(), Some("78"));

        reopened.remove("lastResumeScore").unwrap();
        let again = JsonFileStore::open(&path).unwrap();
        assert!(again.get("lastResumeScore").is_none());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.set("lastResumeScore", "50".to_string()).unwrap();

        // A directory where the document should be makes every write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.set("lastResumeScore", "78".to_string()).is_err());
        assert!(store
            .set_many(vec![
                ("lastResumeScore", "78".to_string()),
                ("lastResumeSuggestions", "[]".to_string()),
            ])
            .is_err());
        assert!(store.remove("lastResumeScore").is_err());

        assert_eq!(store.get("lastResumeScore").as_deref(), Some("50"));
        assert!(store.get("lastResumeSuggestions").is_none());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
