mod backend;
mod namespaced;
pub mod prefs;

pub use backend::{KeyValueBackend, MemoryBackend, SqliteBackend, StorageError};
pub use namespaced::NamespacedStorage;
pub use prefs::{FormDraft, SearchEntry, ServiceInteraction, UserPreferences, ViewedEntry};
