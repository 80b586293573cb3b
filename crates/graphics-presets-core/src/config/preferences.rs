//! User preference persistence.
//!
//! The preset subsystem only needs a string key/value store. The launcher
//! supplies its own implementation; [`JsonPreferenceStore`] and
//! [`MemoryPreferenceStore`] cover the standalone and test cases.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keys understood by the preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// The currently selected graphics preset (its `real` name)
    Graphics,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::Graphics => "graphics",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value persistence for user preferences
pub trait PreferenceStore: Send + Sync {
    fn get_preference(&self, key: PreferenceKey) -> Result<Option<String>>;

    fn set_preference(&self, key: PreferenceKey, value: &str) -> Result<()>;
}

/// In-memory preference store
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a single preference already set
    pub fn with(key: PreferenceKey, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.as_str().to_string(), value.into());
        }
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_preference(&self, key: PreferenceKey) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| Error::Preference(e.to_string()))?;
        Ok(values.get(key.as_str()).cloned())
    }

    fn set_preference(&self, key: PreferenceKey, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| Error::Preference(e.to_string()))?;
        values.insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store backed by a flat JSON object on disk
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every key in the file. Values written by other parts of the launcher
    /// may be of any JSON type and are kept as-is.
    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            Error::Preference(format!("{} is not valid JSON: {}", self.path.display(), e))
        })?;
        match value {
            Value::Object(values) => Ok(values),
            _ => Err(Error::Preference(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get_preference(&self, key: PreferenceKey) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|e| Error::Preference(e.to_string()))?;
        Ok(self
            .read_all()?
            .get(key.as_str())
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set_preference(&self, key: PreferenceKey, value: &str) -> Result<()> {
        let _guard = self.lock.lock().map_err(|e| Error::Preference(e.to_string()))?;
        let mut values = self.read_all()?;
        values.insert(key.as_str().to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&values)
            .map_err(|e| Error::Preference(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
