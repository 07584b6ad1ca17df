use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use super::kv::KeyValueStore;
use crate::error::{Result, WebUiError};

/// Key-value store backed by a single JSON object file. The whole file is
/// rewritten on every `set`; memory only changes once the write succeeded.
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str::<BTreeMap<String, String>>(&data).map_err(|source| {
                    WebUiError::Corrupt {
                        key: path.display().to_string(),
                        source,
                    }
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = values.len(), "opened file store");
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, serialized)?;
        debug!(path = %self.path.display(), "flushed file store");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.values.read().map_err(|_| WebUiError::Lock)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.values.write().map_err(|_| WebUiError::Lock)?;
        let mut next = map.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *map = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local_storage.json");

        let store = FileStore::open(path.clone()).unwrap();
        store.set("browserUseApiKey", "sk-test").unwrap();
        drop(store);

        let reopened = FileStore::open(path).unwrap();
        assert_eq!(
            reopened.get("browserUseApiKey").unwrap().as_deref(),
            Some("sk-test")
        );
    }

    #[test]
    fn failed_write_leaves_values_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = FileStore::open(blocker.join("local_storage.json")).unwrap();
        let err = store.set("browserUseApiKey", "sk-test").unwrap_err();
        assert!(matches!(err, WebUiError::Storage(_)));
        assert_eq!(store.get("browserUseApiKey").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileStore::open(path).err().unwrap();
        assert!(matches!(err, WebUiError::Corrupt { .. }));
    }
}
