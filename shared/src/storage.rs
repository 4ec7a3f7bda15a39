//! Persisted UI preferences
//!
//! Only two plain strings survive a reload: the last estimator type and the
//! last manual weather location. Storage failures never interrupt the UI;
//! they are logged and otherwise ignored.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::models::EstimateKind;

/// Key of the last-used estimator type
pub const ESTIMATOR_KIND_KEY: &str = "top_tools_est_type";

/// Key of the last manual weather location
pub const WEATHER_LOCATION_KEY: &str = "top_tools_location";

/// String key/value store (browser `localStorage`, a JSON file, memory)
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to the panel's preferences
pub struct Preferences<'a, S: PreferenceStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: PreferenceStore + ?Sized> Preferences<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Saved estimator type; unknown values are ignored
    pub fn estimator_kind(&self) -> Option<EstimateKind> {
        self.read(ESTIMATOR_KIND_KEY)?.parse().ok()
    }

    pub fn save_estimator_kind(&self, kind: EstimateKind) {
        self.write(ESTIMATOR_KIND_KEY, kind.as_str());
    }

    /// Saved manual location, if any
    pub fn weather_location(&self) -> Option<String> {
        self.read(WEATHER_LOCATION_KEY).filter(|s| !s.is_empty())
    }

    pub fn save_weather_location(&self, location: &str) {
        self.write(WEATHER_LOCATION_KEY, location);
    }

    /// Forget both preferences
    pub fn clear(&self) {
        for key in [ESTIMATOR_KIND_KEY, WEATHER_LOCATION_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::debug!("Failed to remove preference {}: {}", key, e);
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Failed to read preference {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::debug!("Failed to save preference {}: {}", key, e);
        }
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes, like storage in a locked-down browser
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::default(),
            read_only: true,
        }
    }

    /// Copy of the current entries
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("store is read-only".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("store is read-only".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
