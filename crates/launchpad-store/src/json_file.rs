//! Single-file JSON store.
//!
//! Every key lives in one pretty-printed JSON object, e.g.
//! `{ "launchpad.groups": [ ... ] }`. A missing file reads as empty.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use launchpad_core::{Error, Result};

use crate::port::KeyValueStore;

/// Key-value store backed by one JSON file on disk.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if data.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&data)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let _guard = self.write_lock.lock();
        // Other keys share the file; never overwrite one we cannot read.
        let mut entries = self.read_entries().map_err(|e| {
            warn!("Refusing to save to {}: {}", self.path.display(), e);
            e
        })?;
        entries.insert(key.to_string(), value.clone());
        self.write_entries(&entries)?;
        debug!("Saved key {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load("launchpad.groups").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");

        {
            let store = JsonFileStore::new(&path);
            store.save("a", &json!(["/z", "/y", "/x"])).unwrap();
            store.save("b", &json!({ "n": 1 })).unwrap();
        }

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load("a").unwrap(), Some(json!(["/z", "/y", "/x"])));
        assert_eq!(store.load("b").unwrap(), Some(json!({ "n": 1 })));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_non_object_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load("a"), Err(Error::Storage(_))));
    }

    #[test]
    fn test_corrupt_file_is_left_alone_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ \"other\": 1, not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load("a"), Err(Error::Json(_))));
        assert!(matches!(store.save("a", &json!([])), Err(Error::Json(_))));

        let data = std::fs::read_to_string(&path).unwrap();
        assert_eq!(data, "{ \"other\": 1, not json");
    }
}
