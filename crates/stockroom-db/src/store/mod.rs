//! # Persistent Store Adapter
//!
//! The ledger persists each collection as one opaque blob under a name.
//! This module defines that contract; implementations live alongside.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStore                                                          │
//! │  ├── get("products")  → Some("[{...},{...}]") | None                   │
//! │  ├── set("sales", blob)                                                │
//! │  └── set_many([("products", ..), ("sales", ..)])                       │
//! │                                                                         │
//! │  SqliteStore  - kv_store table, set_many in one transaction            │
//! │  MemoryStore  - HashMap, for tests and throwaway sessions              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Last write wins. There is no versioning of keys or blobs.

use async_trait::async_trait;

use crate::error::DbResult;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Named blob storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if never written.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    async fn set(&self, key: &str, blob: &str) -> DbResult<()>;

    /// Stores several entries.
    ///
    /// The default writes them one by one; implementations that can write
    /// them atomically should override it.
    async fn set_many(&self, entries: &[(String, String)]) -> DbResult<()> {
        for (key, blob) in entries {
            self.set(key, blob).await?;
        }
        Ok(())
    }
}
