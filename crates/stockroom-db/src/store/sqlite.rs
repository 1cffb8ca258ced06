//! # SQLite Store
//!
//! KeyValueStore backed by the `kv_store` table.
//!
//! ## Atomic Flush
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_many([("products", ..), ("sales", ..)])                           │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    INSERT .. ON CONFLICT(key) DO UPDATE  ("products")                  │
//! │    INSERT .. ON CONFLICT(key) DO UPDATE  ("sales")                     │
//! │  COMMIT ← stock decrement and sale row land together or not at all    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::KeyValueStore;

const UPSERT: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

/// Key-value store over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store over an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    /// Lists stored keys (for diagnostics).
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, blob: &str) -> DbResult<()> {
        debug!(key = %key, bytes = blob.len(), "Writing blob");

        sqlx::query(UPSERT)
            .bind(key)
            .bind(blob)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> DbResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let now = Utc::now();
        for (key, blob) in entries {
            debug!(key = %key, bytes = blob.len(), "Writing blob");
            sqlx::query(UPSERT)
                .bind(key)
                .bind(blob)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}
