//! Preferences persisted to a JSON file

use shared::{PreferenceStore, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Flat string map stored as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries; a missing file is an empty store
    pub fn entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };
        serde_json::from_str(&text).map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StorageError::Write(e.to_string()))?;
        }
        let text =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| StorageError::Write(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}
