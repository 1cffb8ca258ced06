//! # Inventory
//!
//! The authoritative in-memory product catalog and sales history.
//!
//! ## Sale Recording
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record_sale("T1", 3, today)                          │
//! │                                                                         │
//! │  1. Find product by serial ──── none? ──► UnknownSerial                │
//! │       │                                                                 │
//! │  2. quantity > 0 ────────────── no? ────► InvalidQuantity              │
//! │       │                                                                 │
//! │  3. quantity <= stock ───────── no? ────► InsufficientStock            │
//! │       │                                                                 │
//! │  4. quantity × price fits ───── no? ────► TotalOverflow                │
//! │       │                                                                 │
//! │  5. stock -= quantity                                                  │
//! │     total  = quantity × price_per_box                                  │
//! │     sales.push(Sale { snapshot of name/type, date })                   │
//! │                                                                         │
//! │  Steps 1-4 never mutate; step 5 cannot fail.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence is not this module's concern: `stockroom-db::Ledger` wraps an
//! `Inventory` and flushes it after each mutation.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductFilter, Sale, Summary};
use crate::validation::validate_product;

/// Outcome of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Serials that were not in the catalog before.
    pub inserted: usize,
    /// Serials whose existing record was replaced.
    pub updated: usize,
}

/// Products and sales, owned together.
///
/// Products keep their display order. Sales are append-only, so their order
/// is chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    products: Vec<Product>,
    sales: Vec<Sale>,
}

impl Inventory {
    pub fn new(products: Vec<Product>, sales: Vec<Sale>) -> Self {
        Inventory { products, sales }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All sales in the order they were recorded.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Looks up a product by serial (surrounding whitespace ignored).
    pub fn product(&self, serial: &str) -> Option<&Product> {
        let serial = serial.trim();
        self.products.iter().find(|p| p.serial == serial)
    }

    /// Products matching `filter`. Each call returns a fresh iterator.
    pub fn list_products(&self, filter: ProductFilter) -> impl Iterator<Item = &Product> + '_ {
        self.products
            .iter()
            .filter(move |p| filter.matches(&p.kind))
    }

    /// Sales whose frozen `type` matches `filter`.
    pub fn list_sales(&self, filter: ProductFilter) -> impl Iterator<Item = &Sale> + '_ {
        self.sales.iter().filter(move |s| filter.matches(&s.kind))
    }

    /// Sales recorded against one serial.
    pub fn sales_for<'a>(&'a self, serial: &'a str) -> impl Iterator<Item = &'a Sale> + 'a {
        let serial = serial.trim();
        self.sales.iter().filter(move |s| s.serial == serial)
    }

    /// Dashboard figures.
    ///
    /// Blank stock counts as zero, so a product with no stock recorded is
    /// always reported as low stock.
    pub fn summary(&self, low_stock_threshold: i64) -> Summary {
        Summary {
            product_count: self.products.len(),
            total_stock_units: self
                .products
                .iter()
                .map(Product::stock_or_zero)
                .fold(0, i64::saturating_add),
            sales_count: self.sales.len(),
            total_sales_value: self.sales.iter().map(|s| s.total).sum::<Money>(),
            low_stock_products: self
                .products
                .iter()
                .filter(|p| p.is_low_stock(low_stock_threshold))
                .cloned()
                .collect(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a sale of `quantity` boxes of `serial` on `date`.
    ///
    /// ## Errors
    /// - [`CoreError::UnknownSerial`] if no product has this serial
    /// - [`CoreError::InvalidQuantity`] if `quantity <= 0`
    /// - [`CoreError::InsufficientStock`] if `quantity` exceeds stock
    /// - [`CoreError::TotalOverflow`] if quantity × price does not fit
    ///
    /// On error nothing is changed.
    pub fn record_sale(&mut self, serial: &str, quantity: i64, date: NaiveDate) -> CoreResult<Sale> {
        let serial = serial.trim();

        let product = self
            .products
            .iter_mut()
            .find(|p| p.serial == serial)
            .ok_or_else(|| CoreError::UnknownSerial(serial.to_string()))?;

        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        let available = product.stock_or_zero();
        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                serial: serial.to_string(),
                available,
                requested: quantity,
            });
        }

        let total = product
            .price_or_zero()
            .multiply_quantity(quantity)
            .ok_or_else(|| CoreError::TotalOverflow {
                serial: serial.to_string(),
                requested: quantity,
            })?;

        product.stock = Some(available - quantity);

        let sale = Sale {
            serial: product.serial.clone(),
            name: product.name.clone(),
            kind: product.kind.clone(),
            quantity,
            total,
            date,
        };
        self.sales.push(sale.clone());

        Ok(sale)
    }

    /// Takes back the most recent sale: pops it and returns its boxes to stock.
    ///
    /// Used when a recorded sale could not be persisted. Returns `None` when
    /// there are no sales.
    pub fn revert_last_sale(&mut self) -> Option<Sale> {
        let sale = self.sales.pop()?;
        if let Some(product) = self.products.iter_mut().find(|p| p.serial == sale.serial) {
            product.stock = Some(product.stock_or_zero() + sale.quantity);
        }
        Some(sale)
    }

    /// Adds or replaces products by serial.
    ///
    /// Every record is validated before anything changes; a batch with one
    /// bad row is rejected whole. Replaced products keep their position,
    /// new ones are appended. Sales are untouched.
    pub fn import_products(&mut self, products: Vec<Product>) -> CoreResult<ImportReport> {
        let mut seen = HashSet::new();
        for product in &products {
            validate_product(product)?;
            if !seen.insert(product.serial.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "serial".to_string(),
                    value: product.serial.clone(),
                }
                .into());
            }
        }

        let mut report = ImportReport::default();
        for product in products {
            match self.products.iter_mut().find(|p| p.serial == product.serial) {
                Some(existing) => {
                    *existing = product;
                    report.updated += 1;
                }
                None => {
                    self.products.push(product);
                    report.inserted += 1;
                }
            }
        }

        Ok(report)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
