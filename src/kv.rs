//! Local key-value backends.
//!
//! The post collection lives under a single key as a serialized string. A
//! `FileKeyValueStore` keeps every key in one JSON map on disk; a
//! `MemoryKeyValueStore` is used when no durable location is available and
//! in tests.
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, trace, warn};
use tempfile::NamedTempFile;

use crate::{BlogError, Config, Result};

/// String-keyed persistent storage, shaped like a browser's local storage
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Key-value store backed by a single JSON object file
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            trace!("Store file {} does not exist yet", self.path.display());
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| {
            error!("Failed to read store file {}: {}", self.path.display(), e);
            BlogError::Io(e)
        })?;

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| BlogError::InvalidFormat {
            message: format!("Store file {} is not a key-value map: {}", self.path.display(), e),
        })
    }

    /// Writes the whole map through a temporary file renamed into place
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            debug!("Creating store directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory {}: {}", dir.display(), e);
                BlogError::DirectoryError {
                    path: dir.to_path_buf(),
                }
            })?;
        }

        let mut temp_file = NamedTempFile::new_in(dir)?;
        let json = serde_json::to_string_pretty(map)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&self.path).map_err(|e| {
            error!("Failed to persist store file {}: {}", self.path.display(), e.error);
            BlogError::Io(e.error)
        })?;

        trace!("Wrote {} keys to {}", map.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Picks the backend for `config`: the file store when the data directory is
/// usable, otherwise an in-memory store.
pub fn open_backend(config: &Config) -> Box<dyn KeyValueStore> {
    if config.in_memory {
        debug!("Using in-memory storage (requested)");
        return Box::new(MemoryKeyValueStore::new());
    }

    match fs::create_dir_all(&config.data_dir) {
        Ok(_) => {
            debug!("Using file storage at {}", config.store_path().display());
            Box::new(FileKeyValueStore::new(config.store_path()))
        }
        Err(e) => {
            warn!(
                "Data directory {} is not usable ({}), posts will not be persisted",
                config.data_dir.display(),
                e
            );
            Box::new(MemoryKeyValueStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryKeyValueStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileKeyValueStore::new(dir.path().join("sub").join("kv.json"));

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.remove_item("a").unwrap();

        let reopened = FileKeyValueStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get_item("a").unwrap(), None);
        assert_eq!(reopened.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file_store_rejects_garbage_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileKeyValueStore::new(path);
        assert!(matches!(
            store.get_item("a"),
            Err(BlogError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn open_backend_honours_in_memory_flag() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            in_memory: true,
            ..Config::default()
        };

        let mut backend = open_backend(&config);
        backend.set_item("k", "v").unwrap();
        assert!(!config.store_path().exists());
    }

    #[test]
    fn open_backend_falls_back_when_dir_unusable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let config = Config {
            data_dir: blocker.join("data"),
            ..Config::default()
        };

        let mut backend = open_backend(&config);
        backend.set_item("k", "v").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
