//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Summary      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  serial (key)   │◄──│  serial (copy)  │   │  product_count  │       │
//! │  │  type / brand   │   │  name  (frozen) │   │  stock units    │       │
//! │  │  name / size    │   │  type  (frozen) │   │  sales value    │       │
//! │  │  price_per_box  │   │  quantity       │   │  low stock      │       │
//! │  │  stock          │   │  total / date   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │ProductCategory  │   │ ProductFilter   │                              │
//! │  │  Tile           │   │  All            │                              │
//! │  │  Sanitary       │   │  Tile/Sanitary  │                              │
//! │  │  Other          │   │  Other          │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Numbers
//! Imported rows often leave counts and prices blank. Those fields are
//! `Option` so a blank survives a save/load round trip unchanged; readers use
//! the `*_or_zero` accessors, which treat a blank as zero.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// What kind of goods a product is.
///
/// Stored on records as the free-form `type` label; anything that is neither
/// a tile nor sanitaryware is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Tile,
    Sanitary,
    Other,
}

impl ProductCategory {
    /// Classifies a `type` label, ignoring case and surrounding whitespace.
    pub fn classify(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("tile") {
            ProductCategory::Tile
        } else if label.eq_ignore_ascii_case("sanitary") {
            ProductCategory::Sanitary
        } else {
            ProductCategory::Other
        }
    }

    /// Canonical lowercase label.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Tile => "tile",
            ProductCategory::Sanitary => "sanitary",
            ProductCategory::Other => "other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Category filter for product and sale listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductFilter {
    /// Everything, unfiltered.
    #[default]
    All,
    Tile,
    Sanitary,
    /// Neither tile nor sanitary.
    Other,
}

impl ProductFilter {
    /// Returns the category this filter selects, or `None` for `All`.
    pub const fn category(&self) -> Option<ProductCategory> {
        match self {
            ProductFilter::All => None,
            ProductFilter::Tile => Some(ProductCategory::Tile),
            ProductFilter::Sanitary => Some(ProductCategory::Sanitary),
            ProductFilter::Other => Some(ProductCategory::Other),
        }
    }

    /// Checks a record's `type` label against this filter.
    pub fn matches(&self, kind: &str) -> bool {
        match self.category() {
            None => true,
            Some(category) => ProductCategory::classify(kind) == category,
        }
    }
}

impl From<ProductCategory> for ProductFilter {
    fn from(category: ProductCategory) -> Self {
        match category {
            ProductCategory::Tile => ProductFilter::Tile,
            ProductCategory::Sanitary => ProductFilter::Sanitary,
            ProductCategory::Other => ProductFilter::Other,
        }
    }
}

/// Parses the section names used by the UI navigation.
///
/// ```rust
/// use stockroom_core::ProductFilter;
///
/// assert_eq!("Tile".parse::<ProductFilter>().unwrap(), ProductFilter::Tile);
/// assert_eq!("".parse::<ProductFilter>().unwrap(), ProductFilter::All);
/// ```
impl FromStr for ProductFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(ProductFilter::All)
        } else if s.eq_ignore_ascii_case("tile") {
            Ok(ProductFilter::Tile)
        } else if s.eq_ignore_ascii_case("sanitary") {
            Ok(ProductFilter::Sanitary)
        } else if s.eq_ignore_ascii_case("other") {
            Ok(ProductFilter::Other)
        } else {
            Err(ValidationError::InvalidFormat {
                field: "filter".to_string(),
                reason: format!("unknown section '{}'", s),
            })
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the store's catalog.
///
/// The `serial` is assigned by whoever prepares the import sheet and never
/// changes afterwards. `stock` is only ever decremented by recording a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique business identifier.
    pub serial: String,

    /// Category label as imported ("Tile", "sanitary", "Adhesive", ...).
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub name: String,

    /// Tile size such as "600x600 mm".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_boxes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pieces: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_box: Option<Money>,

    /// Boxes on hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl Product {
    /// Creates a product with no size, counts, price or stock.
    pub fn new(
        serial: impl Into<String>,
        kind: impl Into<String>,
        brand: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Product {
            serial: serial.into(),
            kind: kind.into(),
            brand: brand.into(),
            name: name.into(),
            size: None,
            num_boxes: None,
            num_pieces: None,
            price_per_box: None,
            stock: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_boxes(mut self, num_boxes: i64) -> Self {
        self.num_boxes = Some(num_boxes);
        self
    }

    pub fn with_pieces(mut self, num_pieces: i64) -> Self {
        self.num_pieces = Some(num_pieces);
        self
    }

    pub fn with_price_per_box(mut self, price: Money) -> Self {
        self.price_per_box = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Category derived from the `type` label.
    #[inline]
    pub fn category(&self) -> ProductCategory {
        ProductCategory::classify(&self.kind)
    }

    /// Stock on hand, blank counted as zero.
    #[inline]
    pub fn stock_or_zero(&self) -> i64 {
        self.stock.unwrap_or(0)
    }

    /// Price per box, blank counted as zero.
    #[inline]
    pub fn price_or_zero(&self) -> Money {
        self.price_per_box.unwrap_or_default()
    }

    /// Checks whether stock is at or below `threshold`.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock_or_zero() <= threshold
    }

    /// Checks if `quantity` boxes can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock_or_zero() >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale.
///
/// Uses the snapshot pattern: `name` and `kind` are copied from the product
/// when the sale is recorded, so renaming a product later does not rewrite
/// history. Sales are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Serial of the product sold (copied, not a managed reference).
    pub serial: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Product `type` label at time of sale (frozen).
    #[serde(rename = "type")]
    pub kind: String,

    /// Boxes sold.
    pub quantity: i64,

    /// quantity × price per box at time of sale. Absent in old records means zero.
    #[serde(default)]
    pub total: Money,

    /// Calendar date the sale was recorded.
    #[ts(as = "String")]
    pub date: NaiveDate,
}

impl Sale {
    /// Category derived from the frozen `type` label.
    #[inline]
    pub fn category(&self) -> ProductCategory {
        ProductCategory::classify(&self.kind)
    }

    /// Formats the sale date with a `chrono` format string (e.g. `%d/%m/%Y`).
    pub fn display_date(&self, format: &str) -> String {
        self.date.format(format).to_string()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Dashboard figures derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub product_count: usize,
    /// Sum of stock over all products, blanks counted as zero.
    pub total_stock_units: i64,
    pub sales_count: usize,
    /// Sum of sale totals.
    pub total_sales_value: Money,
    /// Products at or below the low-stock threshold, in display order.
    pub low_stock_products: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================
