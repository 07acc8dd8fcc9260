//! Small JSON key/value file for state that never leaves this machine.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use deskboard_core::StorageError;

pub const NOTES_KEY: &str = "notes";
pub const LOCATION_KEY: &str = "selectedLocation";

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`.
    ///
    /// A missing file, a corrupt file or a value of the wrong shape all read
    /// as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.read_all().remove(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Ignoring unreadable local value '{}': {}", key, e);
                None
            }
        }
    }

    /// Store `value` under `key`, keeping every other key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", key, e)))?;

        let mut entries = self.read_all();
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!("Saved local value '{}'", key);
        Ok(())
    }

    fn read_all(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                tracing::warn!("Local store {} is not a JSON object", self.path.display());
                Map::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pin {
        lat: f64,
        lon: f64,
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get::<Pin>(LOCATION_KEY), None);
    }

    #[test]
    fn test_set_then_get_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("local.json"));

        store.set(LOCATION_KEY, &Pin { lat: 1.0, lon: 2.0 }).unwrap();
        store.set(NOTES_KEY, &vec!["a", "b"]).unwrap();

        assert_eq!(store.get::<Pin>(LOCATION_KEY), Some(Pin { lat: 1.0, lon: 2.0 }));
        assert_eq!(store.get::<Vec<String>>(NOTES_KEY).unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_file_and_wrong_shape_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.json");
        let store = LocalStore::new(&path);

        fs::write(&path, "not json").unwrap();
        assert_eq!(store.get::<Pin>(LOCATION_KEY), None);

        fs::write(&path, r#"{"selectedLocation": "somewhere"}"#).unwrap();
        assert_eq!(store.get::<Pin>(LOCATION_KEY), None);

        // A corrupt file is replaced on the next write
        store.set(LOCATION_KEY, &Pin { lat: 3.0, lon: 4.0 }).unwrap();
        assert!(store.get::<Pin>(LOCATION_KEY).is_some());
    }
}
