//! # Ledger
//!
//! The component that owns the product catalog and sales history and keeps
//! them in step with the persistent store.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ledger::initialize(store, config)                                     │
//! │       │  load "products" + "sales" (missing/malformed → empty)         │
//! │       ▼                                                                 │
//! │  ┌──────────────────────── Ledger ────────────────────────┐           │
//! │  │  Inventory (authoritative, in memory)                   │           │
//! │  │                                                         │           │
//! │  │  record_sale(serial, qty)                               │           │
//! │  │    1. Inventory::record_sale ── Err ──► InvalidSale     │           │
//! │  │    2. flush (set_many products+sales)                   │           │
//! │  │         └── Err ──► revert_last_sale ──► Persistence    │           │
//! │  │    3. Ok(sale)                                          │           │
//! │  └─────────────────────────────────────────────────────────┘           │
//! │                                                                         │
//! │  Reads (list_products, list_sales, summary) never touch the store.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations take `&mut self`, so a check-and-decrement can never interleave
//! with another sale. Share a ledger between tasks behind a
//! `tokio::sync::Mutex`.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use stockroom_core::{
    CoreError, ImportReport, Inventory, Product, ProductFilter, Sale, Summary,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::{DbError, DbResult};
use crate::repository::{ProductRepository, SaleRepository};
use crate::store::KeyValueStore;

// =============================================================================
// Errors
// =============================================================================

/// Errors from ledger mutations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The sale was refused; nothing changed.
    ///
    /// ## When This Occurs
    /// - Unknown serial
    /// - Quantity zero or negative
    /// - Quantity above current stock
    #[error("Sale rejected: {0}")]
    InvalidSale(CoreError),

    /// An import batch failed validation; nothing changed.
    #[error("Import rejected: {0}")]
    InvalidProduct(CoreError),

    /// The store refused the flush. The in-memory change was rolled back.
    #[error("Could not save: {0}")]
    Persistence(#[from] DbError),
}

impl LedgerError {
    /// The domain error behind a rejected sale or import, if any.
    pub fn core_error(&self) -> Option<&CoreError> {
        match self {
            LedgerError::InvalidSale(e) | LedgerError::InvalidProduct(e) => Some(e),
            LedgerError::Persistence(_) => None,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Ledger
// =============================================================================

/// Products and sales, persisted after every mutation.
pub struct Ledger {
    inventory: Inventory,
    store: Arc<dyn KeyValueStore>,
    products: ProductRepository,
    sales: SaleRepository,
    config: LedgerConfig,
}

impl Ledger {
    /// Loads both collections from `store`.
    ///
    /// ## Returns
    /// * `Ok(Ledger)` - Collections restored; missing or malformed blobs
    ///   start empty
    /// * `Err(DbError)` - The store could not be read at all
    pub async fn initialize(store: Arc<dyn KeyValueStore>, config: LedgerConfig) -> DbResult<Self> {
        let products = ProductRepository::new(store.clone(), config.products_key.clone());
        let sales = SaleRepository::new(store.clone(), config.sales_key.clone());

        let inventory = Inventory::new(products.load().await?, sales.load().await?);

        info!(
            products = inventory.products().len(),
            sales = inventory.sales().len(),
            "Ledger initialized"
        );

        Ok(Ledger {
            inventory,
            store,
            products,
            sales,
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Read-only view of the in-memory state.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Products matching `filter`, in display order.
    pub fn list_products(&self, filter: ProductFilter) -> impl Iterator<Item = &Product> + '_ {
        self.inventory.list_products(filter)
    }

    /// Sales matching `filter`, oldest first.
    pub fn list_sales(&self, filter: ProductFilter) -> impl Iterator<Item = &Sale> + '_ {
        self.inventory.list_sales(filter)
    }

    pub fn product(&self, serial: &str) -> Option<&Product> {
        self.inventory.product(serial)
    }

    pub fn sales_for<'a>(&'a self, serial: &'a str) -> impl Iterator<Item = &'a Sale> + 'a {
        self.inventory.sales_for(serial)
    }

    /// Dashboard figures using the configured low-stock threshold.
    pub fn summary(&self) -> Summary {
        self.inventory.summary(self.config.low_stock_threshold)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a sale dated today (local time).
    pub async fn record_sale(&mut self, serial: &str, quantity: i64) -> LedgerResult<Sale> {
        self.record_sale_on(serial, quantity, Local::now().date_naive())
            .await
    }

    /// Records a sale with an explicit date.
    ///
    /// ## Errors
    /// * `InvalidSale` - rejected by the inventory; state unchanged
    /// * `Persistence` - flush failed; state rolled back to before the call
    pub async fn record_sale_on(
        &mut self,
        serial: &str,
        quantity: i64,
        date: NaiveDate,
    ) -> LedgerResult<Sale> {
        let sale = match self.inventory.record_sale(serial, quantity, date) {
            Ok(sale) => sale,
            Err(e) => {
                debug!(serial = %serial.trim(), quantity, error = %e, "Sale rejected");
                return Err(LedgerError::InvalidSale(e));
            }
        };

        if let Err(e) = self.flush().await {
            warn!(serial = %sale.serial, quantity, error = %e, "Flush failed, rolling back sale");
            self.inventory.revert_last_sale();
            return Err(LedgerError::Persistence(e));
        }

        info!(
            serial = %sale.serial,
            quantity,
            total = %sale.total,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Adds or replaces products by serial, then flushes.
    ///
    /// The batch is validated whole before anything changes. Replaced
    /// records are overwritten in place, so the catalog is snapshotted for
    /// rollback.
    pub async fn import_products(&mut self, products: Vec<Product>) -> LedgerResult<ImportReport> {
        let snapshot = self.inventory.clone();
        let batch = products.len();

        let report = self
            .inventory
            .import_products(products)
            .map_err(LedgerError::InvalidProduct)?;

        if let Err(e) = self.flush().await {
            warn!(batch, error = %e, "Flush failed, rolling back import");
            self.inventory = snapshot;
            return Err(LedgerError::Persistence(e));
        }

        info!(
            inserted = report.inserted,
            updated = report.updated,
            "Products imported"
        );
        Ok(report)
    }

    /// Writes both collections in one `set_many` call.
    pub async fn flush(&self) -> DbResult<()> {
        let entries = [
            self.products.encode(self.inventory.products())?,
            self.sales.encode(self.inventory.sales())?,
        ];
        self.store.set_many(&entries).await?;

        debug!(
            products = self.inventory.products().len(),
            sales = self.inventory.sales().len(),
            "Ledger flushed"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("products", &self.inventory.products().len())
            .field("sales", &self.inventory.sales().len())
            .field("config", &self.config)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::store::MemoryStore;
    use stockroom_core::{Money, ValidationError};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("T1", "Tile", "Kajaria", "Marble Beige")
                .with_size("600x600")
                .with_boxes(10)
                .with_stock(10)
                .with_price_per_box(Money::from_rupees(200)),
            Product::new("S1", "Sanitary", "Hindware", "Wall Hung WC")
                .with_stock(2)
                .with_price_per_box(Money::from_rupees(8500)),
            Product::new("A1", "Adhesive", "Roff", "Tile Fix 20kg").with_stock(40),
        ]
    }

    async fn seeded(store: Arc<MemoryStore>) -> Ledger {
        let mut ledger = Ledger::initialize(store, LedgerConfig::default())
            .await
            .unwrap();
        ledger.import_products(catalog()).await.unwrap();
        ledger
    }

    #[tokio::test]
    async fn test_initialize_empty_store() {
        let ledger = Ledger::initialize(Arc::new(MemoryStore::new()), LedgerConfig::default())
            .await
            .unwrap();

        assert_eq!(ledger.list_products(ProductFilter::All).count(), 0);
        assert_eq!(ledger.list_sales(ProductFilter::All).count(), 0);
        assert_eq!(ledger.summary().total_sales_value, Money::zero());
    }

    #[tokio::test]
    async fn test_record_sale_decrements_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = seeded(store.clone()).await;

        let sale = ledger.record_sale_on("T1", 3, day()).await.unwrap();
        assert_eq!(sale.total, Money::from_rupees(600));
        assert_eq!(sale.name, "Marble Beige");
        assert_eq!(sale.kind, "Tile");
        assert_eq!(ledger.product("T1").unwrap().stock, Some(7));

        let blob = store.get("sales").await.unwrap().unwrap();
        assert!(blob.contains(r#""serial":"T1""#));
        assert!(blob.contains(r#""total":60000"#));

        let reloaded = Ledger::initialize(store, LedgerConfig::default())
            .await
            .unwrap();
        assert_eq!(reloaded.inventory(), ledger.inventory());
    }

    #[tokio::test]
    async fn test_record_sale_today() {
        let mut ledger = seeded(Arc::new(MemoryStore::new())).await;
        let sale = ledger.record_sale(" S1 ", 2).await.unwrap();

        assert_eq!(sale.serial, "S1");
        assert_eq!(sale.date, Local::now().date_naive());
        assert_eq!(ledger.product("S1").unwrap().stock, Some(0));
    }

    #[tokio::test]
    async fn test_rejected_sales_change_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = seeded(store.clone()).await;
        let before = ledger.inventory().clone();
        let stored = store.get("products").await.unwrap();

        let err = ledger.record_sale_on("T1", 11, day()).await.unwrap_err();
        assert!(matches!(
            err.core_error(),
            Some(CoreError::InsufficientStock {
                available: 10,
                requested: 11,
                ..
            })
        ));

        let err = ledger.record_sale_on("NOPE", 1, day()).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidSale(CoreError::UnknownSerial(_))
        ));

        for quantity in [0, -4] {
            let err = ledger.record_sale_on("T1", quantity, day()).await.unwrap_err();
            assert!(matches!(
                err,
                LedgerError::InvalidSale(CoreError::InvalidQuantity { .. })
            ));
        }

        assert_eq!(ledger.inventory(), &before);
        assert_eq!(store.get("products").await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_flush_failure_rolls_back_sale() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = seeded(store.clone()).await;
        let before = ledger.inventory().clone();

        store.reject_writes(true);
        let err = ledger.record_sale_on("T1", 3, day()).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Persistence(DbError::WriteRejected { .. })
        ));
        assert_eq!(ledger.inventory(), &before);
        assert_eq!(ledger.product("T1").unwrap().stock, Some(10));

        store.reject_writes(false);
        ledger.record_sale_on("T1", 3, day()).await.unwrap();
        assert_eq!(ledger.product("T1").unwrap().stock, Some(7));
        assert_eq!(ledger.sales_for("T1").count(), 1);

        // A later failure only takes back its own sale.
        store.reject_writes(true);
        let after_first = ledger.inventory().clone();
        assert!(ledger.record_sale_on("S1", 2, day()).await.is_err());
        assert_eq!(ledger.inventory(), &after_first);
        assert_eq!(ledger.product("S1").unwrap().stock, Some(2));
    }

    #[tokio::test]
    async fn test_import_upserts_and_reports() {
        let mut ledger = seeded(Arc::new(MemoryStore::new())).await;
        ledger.record_sale_on("T1", 1, day()).await.unwrap();

        let report = ledger
            .import_products(vec![
                Product::new("T1", "Tile", "Kajaria", "Marble Ivory").with_stock(50),
                Product::new("W1", "Tile", "Somany", "Glossy White").with_stock(3),
            ])
            .await
            .unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.updated, 1);

        let serials: Vec<_> = ledger
            .list_products(ProductFilter::All)
            .map(|p| p.serial.as_str())
            .collect();
        assert_eq!(serials, vec!["T1", "S1", "A1", "W1"]);

        // The earlier sale keeps its snapshot of the old name.
        assert_eq!(ledger.sales_for("T1").next().unwrap().name, "Marble Beige");
    }

    #[tokio::test]
    async fn test_import_rejections() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = seeded(store.clone()).await;
        let before = ledger.inventory().clone();

        let err = ledger
            .import_products(vec![
                Product::new("N1", "Tile", "Kajaria", "New"),
                Product::new("N1", "Tile", "Kajaria", "Dup"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidProduct(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert_eq!(ledger.inventory(), &before);

        store.reject_writes(true);
        let err = ledger
            .import_products(vec![Product::new("N2", "Other", "Any", "Grout")])
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(ledger.inventory(), &before);
    }

    #[tokio::test]
    async fn test_filters_and_summary() {
        let mut ledger = seeded(Arc::new(MemoryStore::new())).await;
        ledger.record_sale_on("T1", 3, day()).await.unwrap();
        ledger.record_sale_on("S1", 1, day()).await.unwrap();

        assert_eq!(ledger.list_products(ProductFilter::Tile).count(), 1);
        assert_eq!(ledger.list_products(ProductFilter::Other).count(), 1);
        assert_eq!(ledger.list_sales(ProductFilter::Sanitary).count(), 1);
        assert_eq!(ledger.list_sales(ProductFilter::Other).count(), 0);

        let summary = ledger.summary();
        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.total_stock_units, 7 + 1 + 40);
        assert_eq!(summary.sales_count, 2);
        assert_eq!(summary.total_sales_value, Money::from_rupees(600 + 8500));

        let low: Vec<_> = summary
            .low_stock_products
            .iter()
            .map(|p| p.serial.as_str())
            .collect();
        assert_eq!(low, vec!["S1"]);
    }

    #[tokio::test]
    async fn test_configured_threshold_and_keys() {
        let store = Arc::new(MemoryStore::new());
        let config = LedgerConfig {
            products_key: "shop2.products".to_string(),
            sales_key: "shop2.sales".to_string(),
            low_stock_threshold: 10,
            ..LedgerConfig::default()
        };

        let mut ledger = Ledger::initialize(store.clone(), config).await.unwrap();
        ledger.import_products(catalog()).await.unwrap();

        assert_eq!(ledger.summary().low_stock_products.len(), 2);
        assert!(store.get("shop2.products").await.unwrap().is_some());
        assert!(store.get("products").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_store_starts_empty() {
        let store = Arc::new(MemoryStore::with_entries([
            ("products", "{{{"),
            ("sales", "[]"),
        ]));

        let mut ledger = Ledger::initialize(store, LedgerConfig::default())
            .await
            .unwrap();
        assert_eq!(ledger.summary().product_count, 0);

        ledger.import_products(catalog()).await.unwrap();
        assert_eq!(ledger.summary().product_count, 3);
    }

    #[tokio::test]
    async fn test_legacy_blob_with_missing_fields() {
        let store = Arc::new(MemoryStore::with_entries([
            (
                "products",
                r#"[{"serial":"L1","type":"Tile","brand":"X","name":"Old"}]"#,
            ),
            (
                "sales",
                r#"[{"serial":"L1","name":"Old","type":"Tile","quantity":2,"date":"2023-11-02"}]"#,
            ),
        ]));

        let mut ledger = Ledger::initialize(store, LedgerConfig::default())
            .await
            .unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.total_stock_units, 0);
        assert_eq!(summary.total_sales_value, Money::zero());
        assert_eq!(summary.low_stock_products.len(), 1);

        let err = ledger.record_sale_on("L1", 1, day()).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidSale(CoreError::InsufficientStock { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.db");

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            let mut ledger = Ledger::initialize(Arc::new(db.store()), LedgerConfig::default())
                .await
                .unwrap();
            ledger.import_products(catalog()).await.unwrap();
            ledger.record_sale_on("T1", 3, day()).await.unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let ledger = Ledger::initialize(Arc::new(db.store()), LedgerConfig::default())
            .await
            .unwrap();

        assert_eq!(ledger.product("T1").unwrap().stock, Some(7));
        let sale = ledger.sales_for("T1").next().unwrap();
        assert_eq!(sale.total, Money::from_rupees(600));
        assert_eq!(ledger.config().format_date(sale), "05/03/2024");
    }
}
