//! JSON-file-backed string key/value store.
//!
//! The persistence collaborator the engine relies on is a plain key/value
//! store: background snapshots are externalized as independent entries
//! stored verbatim, and the CLI keeps its serialized engine state under a
//! key of its own. Writes go through to disk on every mutation so a
//! process can die at any point without losing the last committed state.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::StoreError;

/// String key/value store persisted as a single JSON object.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`, loading existing entries if the file is
    /// present. A missing file is an empty store, not an error.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            Err(_) => BTreeMap::new(),
        };
        Ok(Self { path, entries })
    }

    /// Open `state.json` in the application data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = super::data_dir().map_err(|e| StoreError::DataDir(e.to_string()))?;
        Self::open(dir.join("state.json"))
    }

    pub fn kv_get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn kv_set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn kv_delete(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StoreError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
