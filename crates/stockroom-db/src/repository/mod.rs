//! # Repository Module
//!
//! Typed access to the collections the ledger keeps in the store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ledger                                                                 │
//! │       │                                                                 │
//! │       │  products.load() / products.encode(&items)                     │
//! │       ▼                                                                 │
//! │  CollectionRepository<T>                                               │
//! │  ├── load()      blob → Vec<T>  (missing or malformed → empty)         │
//! │  ├── encode()    &[T] → (key, blob)                                    │
//! │  └── save()      encode + KeyValueStore::set                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueStore (SQLite, memory)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - the product catalog under `products`
//! - [`SaleRepository`] - the sales history under `sales`

pub mod collection;

pub use collection::CollectionRepository;

use stockroom_core::{Product, Sale};

/// Repository for the product collection.
pub type ProductRepository = CollectionRepository<Product>;

/// Repository for the sales collection.
pub type SaleRepository = CollectionRepository<Sale>;
