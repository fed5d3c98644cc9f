//! # Key-Value Repository
//!
//! String values addressed by string keys, the durable counterpart of the
//! browser's `localStorage`.
//!
//! ## Write Semantics
//! ```text
//! put(key, value)
//!      │
//!      ▼
//! INSERT INTO kv_store … ON CONFLICT(key) DO UPDATE
//!      │
//!      ▼
//! Whole value replaced, updated_at bumped. No partial writes.
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for key-value operations.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        debug!(key = %key, bytes = value.len(), "Writing key-value entry");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = test_db().await;
        assert_eq!(db.kv().get("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let db = test_db().await;
        let kv = db.kv();

        kv.put("@RocketShoes:cart", "[]").await.unwrap();
        assert_eq!(
            kv.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_put_overwrites_whole_value() {
        let db = test_db().await;
        let kv = db.kv();

        kv.put("k", r#"[{"id":1}]"#).await.unwrap();
        kv.put("k", "[]").await.unwrap();

        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoecart.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.kv().put("@RocketShoes:cart", r#"[{"id":2}]"#).await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(
            reopened.kv().get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":2}]"#)
        );
    }
}
