//! # Persistent Store
//!
//! Durable string storage for the cart snapshot. The cart store writes the
//! whole serialized cart under one key after every committed mutation and
//! reads it once at startup.
//!
//! ## Implementations
//! ```text
//! PersistentStore
//!      │
//!      ├── SqliteStore  ──► shoecart-db kv_store table (survives restarts)
//!      │
//!      └── MemoryStore  ──► HashMap (tests, ephemeral sessions)
//! ```

use async_trait::async_trait;
use shoecart_db::Database;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Key-value storage that outlives the process.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Reads the value under `key`, `None` if nothing was ever written.
    async fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value under `key`.
    async fn save(&self, key: &str, value: &str) -> StorageResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// `PersistentStore` on top of the SQLite key-value table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        SqliteStore { db }
    }
}

#[async_trait]
impl PersistentStore for SqliteStore {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.db.kv().get(key).await?)
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.db.kv().put(key, value).await?;
        Ok(())
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Process-local `PersistentStore`.
///
/// Can be switched read-only to simulate a full or locked backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.values.get_mut().insert(key.into(), value.into());
        store
    }

    /// While read-only every `save` fails with [`StorageError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Current raw value under `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.raw(key).await)
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("store is read-only".to_string()));
        }

        debug!(key = %key, bytes = value.len(), "Saving to memory store");
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shoecart_db::DbConfig;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").await.unwrap(), None);

        store.save("k", "[]").await.unwrap();
        assert_eq!(store.load("k").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_memory_store_read_only() {
        let store = MemoryStore::with_value("k", "[]");
        store.set_read_only(true);

        assert!(matches!(
            store.save("k", "[1]").await,
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(store.raw("k").await.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_sqlite_store_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteStore::new(db);

        assert_eq!(store.load("@RocketShoes:cart").await.unwrap(), None);
        store.save("@RocketShoes:cart", "[]").await.unwrap();
        assert_eq!(
            store.load("@RocketShoes:cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_sqlite_store_closed_pool_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteStore::new(db.clone());
        db.close().await;

        assert!(matches!(
            store.save("k", "[]").await,
            Err(StorageError::Database(_))
        ));
    }
}
