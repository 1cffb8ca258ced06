//! # stockroom-db: Storage and Ledger for Stockroom
//!
//! This crate persists the product catalog and sales history and hosts the
//! [`Ledger`], which keeps the in-memory state and the store in step.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Presentation (web UI, CLI, seed binary)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Ledger     │    │  Repositories │    │    Store     │  │   │
//! │  │   │  (ledger.rs)  │───►│ Product / Sale│───►│ SqliteStore  │  │   │
//! │  │   │               │    │ JSON blobs    │    │ MemoryStore  │  │   │
//! │  │   │  Inventory    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: kv_store(key, value, updated_at)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger`] - Ledger orchestration and rollback
//! - [`store`] - Key-value store trait and implementations
//! - [`repository`] - Typed collections over the store
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`config`] - Ledger configuration and default paths
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockroom_db::{Database, DbConfig, Ledger, LedgerConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/stockroom.db")).await?;
//! let mut ledger = Ledger::initialize(Arc::new(db.store()), LedgerConfig::from_env()).await?;
//!
//! let sale = ledger.record_sale("T1", 3).await?;
//! println!("{}", ledger.config().format_currency(sale.total));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{default_database_path, LedgerConfig};
pub use error::{DbError, DbResult};
pub use ledger::{Ledger, LedgerError, LedgerResult};
pub use pool::{Database, DbConfig};
pub use repository::{CollectionRepository, ProductRepository, SaleRepository};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
