//! Directory-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go through a temp file and an
//! atomic rename so a crash never leaves a half-written document behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SlotlogError};
use crate::fs::write_atomic;
use crate::storage::traits::KeyValueStore;

/// Key-value store persisting one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SlotlogError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SlotlogError::InvalidInput(format!(
            "Invalid storage key: {:?}",
            key
        )))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SlotlogError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let value = serde_json::from_str(&contents)?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec_pretty(value)?;
        write_atomic(&path, &bytes).map_err(|e| {
            SlotlogError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!(key, bytes = bytes.len(), "document written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SlotlogError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("logs").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("tags", &json!(["work", "gym"])).unwrap();

        assert_eq!(store.get("tags").unwrap(), Some(json!(["work", "gym"])));
        assert!(dir.path().join("tags.json").exists());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.remove("notes").unwrap();
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let err = store.get("settings").unwrap_err();
        assert!(matches!(err, SlotlogError::Serialization(_)));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", &json!(1)).is_err());
        assert!(store.get("").is_err());
    }
}
