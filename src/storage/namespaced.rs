// src/storage/namespaced.rs
use crate::storage::backend::{KeyValueBackend, MemoryBackend, SqliteBackend, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// JSON key-value storage where every key carries a fixed prefix.
///
/// Nothing here returns an error to the caller: a failed read is "absent",
/// a failed write returns `false`, and a store that cannot be opened is
/// replaced by an in-memory map for the rest of the process.
pub struct NamespacedStorage {
    prefix: String,
    backend: Mutex<Box<dyn KeyValueBackend>>,
    persistent: bool,
}

impl NamespacedStorage {
    /// SQLite-backed storage at `path`, or in-memory storage if that fails.
    pub fn open(path: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        let path = path.as_ref();
        match SqliteBackend::open(path) {
            Ok(backend) => {
                tracing::info!(path = %path.display(), "storage opened");
                Self::with_backend(prefix, Box::new(backend), true)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "persistent storage unavailable, using in-memory storage"
                );
                Self::in_memory(prefix)
            }
        }
    }

    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self::with_backend(prefix, Box::new(MemoryBackend::default()), false)
    }

    pub fn with_backend(
        prefix: impl Into<String>,
        backend: Box<dyn KeyValueBackend>,
        persistent: bool,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            backend: Mutex::new(backend),
            persistent,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn backend(&self) -> MutexGuard<'_, Box<dyn KeyValueBackend>> {
        // A panic mid-operation leaves the map/connection usable; keep going.
        self.backend.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend().get(&self.full_key(key)) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not valid for this type");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialize(e.to_string()))
            .and_then(|json| self.backend().set(&self.full_key(key), &json));

        self.report("write", key, result)
    }

    pub fn remove(&self, key: &str) -> bool {
        let result = self.backend().remove(&self.full_key(key));
        self.report("remove", key, result)
    }

    /// Removes every key in this namespace and nothing else.
    pub fn clear(&self) -> bool {
        let result = self.backend().clear_prefix(&self.prefix);
        self.report("clear", "*", result)
    }

    /// Keys in this namespace with the prefix stripped.
    pub fn keys(&self) -> Vec<String> {
        match self.backend().keys_with_prefix(&self.prefix) {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(&self.prefix).map(str::to_string))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "storage key listing failed");
                Vec::new()
            }
        }
    }

    fn report(&self, op: &str, key: &str, result: Result<(), StorageError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(op, key, error = %e, "storage operation failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        page_size: u32,
    }

    #[test]
    fn test_round_trip_and_namespacing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.sqlite3");
        let ours = NamespacedStorage::open(&path, "homefinder_");
        let theirs = NamespacedStorage::open(&path, "otherapp_");
        assert!(ours.is_persistent());

        let prefs = Prefs { theme: "dark".into(), page_size: 6 };
        assert!(ours.set("prefs", &prefs));
        assert!(theirs.set("prefs", &1));

        assert_eq!(ours.get::<Prefs>("prefs"), Some(prefs));
        assert_eq!(ours.keys(), vec!["prefs"]);

        assert!(ours.clear());
        assert_eq!(ours.get::<Prefs>("prefs"), None);
        assert_eq!(theirs.get::<i32>("prefs"), Some(1));
    }

    #[test]
    fn test_unavailable_store_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("store.sqlite3");

        let storage = NamespacedStorage::open(&path, "homefinder_");
        assert!(!storage.is_persistent());

        assert!(storage.set("favorites", &vec!["1", "2"]));
        assert_eq!(storage.get::<Vec<String>>("favorites"), Some(vec!["1".into(), "2".into()]));
        assert!(storage.remove("favorites"));
        assert_eq!(storage.get::<Vec<String>>("favorites"), None);
    }

    #[test]
    fn test_mistyped_value_reads_as_absent() {
        let storage = NamespacedStorage::in_memory("t_");
        storage.set("count", "not a number");
        assert_eq!(storage.get::<u32>("count"), None);
        assert_eq!(storage.get::<String>("count").as_deref(), Some("not a number"));
    }
}
