// src/storage/backend.rs
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Backend(e.to_string())
    }
}

/// Raw string key-value store. Keys arrive fully prefixed.
pub trait KeyValueBackend: Send {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    /// Every stored key starting with `prefix`, in key order.
    fn keys_with_prefix(&mut self, prefix: &str) -> Result<Vec<String>, StorageError>;
    fn clear_prefix(&mut self, prefix: &str) -> Result<(), StorageError>;
}

/// Persistent backend: one `kv_store` table in a SQLite file.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| StorageError::Backend(format!("Open DB failed: {e}")))?;

        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| StorageError::Backend(format!("Failed to apply schema: {e}")))?;

        Ok(Self { conn })
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys_with_prefix(&mut self, prefix: &str) -> Result<Vec<String>, StorageError> {
        // substr instead of LIKE: prefixes contain '_', which LIKE treats as a wildcard.
        let mut stmt = self.conn.prepare(
            "SELECT key FROM kv_store WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let rows = stmt.query_map(params![prefix], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn clear_prefix(&mut self, prefix: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "DELETE FROM kv_store WHERE substr(key, 1, length(?1)) = ?1",
            params![prefix],
        )?;
        Ok(())
    }
}

/// Session-only substitute used when no persistent store is available.
#[derive(Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl KeyValueBackend for MemoryBackend {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&mut self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn clear_prefix(&mut self, prefix: &str) -> Result<(), StorageError> {
        self.entries.retain(|k, _| !k.starts_with(prefix));
        Ok(())
    }
}
