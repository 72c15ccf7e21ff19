//! Key-value storage layer for roster.
//!
//! This module models the host platform's persistent key-value storage as
//! the [`KeyValueStore`] trait and provides a `SQLite`-backed implementation
//! plus an in-memory one for tests.

pub mod memory;
pub mod schema;
pub mod version;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use memory::MemoryStore;

/// Asynchronous string-to-string persistent storage.
///
/// Each key names one slot. Writes replace the whole value of a slot.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if the slot is absent.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the slot. Removing an absent slot is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// List every key currently present, sorted.
    async fn all_keys(&self) -> Result<Vec<String>>;
}

/// `SQLite`-backed key-value storage.
///
/// The connection is shared behind a mutex and every operation runs on the
/// blocking thread pool, so callers on the async runtime are never stalled
/// by disk I/O. Cloning yields another handle to the same database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        version::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        version::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn stats(&self) -> Result<StorageStats> {
        let total_keys = self
            .with_conn(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_keys,
            db_size_bytes,
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| Error::internal("storage connection lock poisoned"))?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let value = conn
                .query_row("SELECT value FROM kv_store WHERE key = ?1", [&key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
        .await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                r"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                ",
                params![key, value],
            )?;
            debug!("Stored {} bytes under '{}'", value.len(), key);
            Ok(())
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", [&key])?;
            if affected > 0 {
                info!("Removed storage slot '{}'", key);
            }
            Ok(())
        })
        .await
    }

    async fn all_keys(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(keys)
        })
        .await
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of slots present.
    pub total_keys: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> SqliteStore {
        SqliteStore::open_in_memory().expect("failed to create test storage")
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let storage = create_test_storage();
        assert_eq!(storage.get_item("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let storage = create_test_storage();
        storage.set_item("studentData", "[]").await.unwrap();

        assert_eq!(
            storage.get_item("studentData").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let storage = create_test_storage();
        storage.set_item("k", "one").await.unwrap();
        storage.set_item("k", "two").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap(), Some("two".to_string()));
        assert_eq!(storage.all_keys().await.unwrap(), vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let storage = create_test_storage();
        storage.set_item("k", "v").await.unwrap();
        storage.remove_item("k").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_item_is_ok() {
        let storage = create_test_storage();
        assert!(storage.remove_item("never-set").await.is_ok());
    }

    #[tokio::test]
    async fn test_all_keys_sorted() {
        let storage = create_test_storage();
        storage.set_item("b", "2").await.unwrap();
        storage.set_item("a", "1").await.unwrap();

        assert_eq!(
            storage.all_keys().await.unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unicode_value() {
        let storage = create_test_storage();
        storage.set_item("k", "Hello 世界 🌍").await.unwrap();

        assert_eq!(
            storage.get_item("k").await.unwrap(),
            Some("Hello 世界 🌍".to_string())
        );
    }

    #[tokio::test]
    async fn test_clone_shares_connection() {
        let storage = create_test_storage();
        let other = storage.clone();
        storage.set_item("k", "v").await.unwrap();

        assert_eq!(other.get_item("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_stats_in_memory() {
        let storage = create_test_storage();
        storage.set_item("k", "v").await.unwrap();

        let stats = storage.stats().await.unwrap();
        assert_eq!(stats.total_keys, 1);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[tokio::test]
    async fn test_open_file_based_persists() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("roster_test_{}.db", std::process::id()));

        let storage = SqliteStore::open(&db_path).unwrap();
        storage.set_item("studentData", "[]").await.unwrap();
        assert_eq!(storage.path(), db_path);
        drop(storage);

        let reopened = SqliteStore::open(&db_path).unwrap();
        assert_eq!(
            reopened.get_item("studentData").await.unwrap(),
            Some("[]".to_string())
        );
        let stats = reopened.stats().await.unwrap();
        assert!(stats.db_size_bytes > 0);

        drop(reopened);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let root = temp_dir.join(format!("roster_test_dirs_{}", std::process::id()));
        let nested_path = root.join("nested/storage.db");
        let _ = std::fs::remove_dir_all(&root);

        let storage = SqliteStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }
}
