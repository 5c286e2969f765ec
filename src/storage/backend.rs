//! Key-value backends for the DIRS store.
//!
//! A backend maps slot keys to serialized documents. [`MemoryStore`] keeps
//! them in a map and is what tests inject; [`FileStore`] keeps one JSON file
//! per key under a data directory.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Get/set/delete access to string documents keyed by slot name.
pub trait KeyValueStore {
    /// Raw document for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

// ─────────────────────────────────────────────────────────────────
// In-memory backend
// ─────────────────────────────────────────────────────────────────

/// Volatile backend holding documents in a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every stored entry, for comparing before/after states.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        trace!(key, bytes = value.len(), "Memory slot written");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// File backend
// ─────────────────────────────────────────────────────────────────

/// Backend storing each key as `<root>/<key>.json`.
///
/// The root directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the slot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| Error::IoWrite {
                path: self.root.clone(),
                source: e,
            })?;
            debug!(path = %self.root.display(), "Created data directory");
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::IoRead { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| Error::storage_write(key, e))?;
        trace!(path = %path.display(), bytes = value.len(), "Slot file written");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::StorageDelete {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
