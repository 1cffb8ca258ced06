//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate holds the inventory ledger's rules as pure code with zero I/O
//! dependencies. Persistence lives in `stockroom-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (tables, dashboard, forms)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ record_sale / list_* / summary         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db::Ledger (flushes)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ inventory │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Inventory │  │   rules   │  │   │
//! │  │   │   Sale    │  │  (paise)  │  │  Summary  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, categories, Summary)
//! - [`money`] - Money type with integer arithmetic in paise
//! - [`inventory`] - In-memory product and sale collections
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stockroom_core::{Inventory, Money, Product};
//!
//! let mut inventory = Inventory::new(
//!     vec![Product::new("T1", "tile", "Kajaria", "Glossy White")
//!         .with_stock(10)
//!         .with_price_per_box(Money::from_rupees(200))],
//!     Vec::new(),
//! );
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let sale = inventory.record_sale("T1", 3, date).unwrap();
//!
//! assert_eq!(sale.total, Money::from_rupees(600));
//! assert_eq!(inventory.product("T1").unwrap().stock, Some(7));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{ImportReport, Inventory};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products at or below this many units count as "low stock".
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Longest serial accepted on import.
pub const MAX_SERIAL_LEN: usize = 64;

/// Largest stock, box or piece count accepted on import.
pub const MAX_COUNT: i64 = 1_000_000;

/// Largest price per box accepted on import, in paise (₹1,000,000,000).
pub const MAX_PRICE_PAISE: i64 = 100_000_000_000;
