//! Autosave storage for the raw editor source
//!
//! The editor keeps exactly one document per key. `MemoryStore` backs tests
//! and the WASM build; `JsonFileStore` persists a flat JSON object of
//! key → source on disk.

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::error::{RenderError, RenderResult};

/// Key/value store for raw document sources
pub trait SourceStore {
    /// Stored source for `key`, if any
    fn load(&self, key: &str) -> RenderResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&mut self, key: &str, value: &str) -> RenderResult<()>;

    /// Forget `key`
    fn remove(&mut self, key: &str) -> RenderResult<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SourceStore for MemoryStore {
    fn load(&self, key: &str) -> RenderResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> RenderResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RenderResult<()> {
        self.entries.shift_remove(key);
        Ok(())
    }
}

/// JSON file store. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> RenderResult<IndexMap<String, String>> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            RenderError::storage(self.path.display().to_string(), e.to_string())
        })
    }

    fn write_all(&self, entries: &IndexMap<String, String>) -> RenderResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SourceStore for JsonFileStore {
    fn load(&self, key: &str) -> RenderResult<Option<String>> {
        Ok(self.read_all()?.shift_remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> RenderResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)?;
        debug!(key, bytes = value.len(), path = %self.path.display(), "source saved");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RenderResult<()> {
        let mut entries = self.read_all()?;
        if entries.shift_remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v1").unwrap();
        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn test_json_store_persists_between_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("autosave.json");
        let mut store = JsonFileStore::new(&path);
        store.save("a", r"\textbf{x}").unwrap();
        store.save("b", "other").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load("a").unwrap().as_deref(), Some(r"\textbf{x}"));
        assert_eq!(reopened.load("b").unwrap().as_deref(), Some("other"));
    }

    #[test]
    fn test_json_store_corrupt_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::new(&path).load("a").unwrap_err();
        assert!(matches!(err, RenderError::Storage { .. }));
    }
}
