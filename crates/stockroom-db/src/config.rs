//! # Ledger Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKROOM_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after the ledger is initialized.

use std::path::PathBuf;

use directories::ProjectDirs;
use stockroom_core::{Money, Sale, DEFAULT_LOW_STOCK_THRESHOLD};

use crate::error::{DbError, DbResult};

pub const ENV_DB_PATH: &str = "STOCKROOM_DB_PATH";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";
pub const ENV_DATE_FORMAT: &str = "STOCKROOM_DATE_FORMAT";
pub const ENV_PRODUCTS_KEY: &str = "STOCKROOM_PRODUCTS_KEY";
pub const ENV_SALES_KEY: &str = "STOCKROOM_SALES_KEY";

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Store key holding the product catalog.
    /// Default: "products"
    pub products_key: String,

    /// Store key holding the sales history.
    /// Default: "sales"
    pub sales_key: String,

    /// Products with stock at or below this count are low stock.
    /// Default: 5
    pub low_stock_threshold: i64,

    /// `chrono` format string for sale dates.
    /// Default: "%d/%m/%Y"
    pub date_format: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            products_key: "products".to_string(),
            sales_key: "sales".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            date_format: "%d/%m/%Y".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Creates a LedgerConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKROOM_LOW_STOCK_THRESHOLD`: non-negative integer
    /// - `STOCKROOM_DATE_FORMAT`: e.g. `%Y-%m-%d`
    /// - `STOCKROOM_PRODUCTS_KEY`, `STOCKROOM_SALES_KEY`: store keys
    ///
    /// Unparseable or empty values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = LedgerConfig::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(threshold) = non_empty(ENV_LOW_STOCK_THRESHOLD) {
            if let Ok(value) = threshold.trim().parse::<i64>() {
                if value >= 0 {
                    config.low_stock_threshold = value;
                }
            }
        }

        if let Some(format) = non_empty(ENV_DATE_FORMAT) {
            config.date_format = format;
        }

        if let Some(key) = non_empty(ENV_PRODUCTS_KEY) {
            config.products_key = key;
        }

        if let Some(key) = non_empty(ENV_SALES_KEY) {
            config.sales_key = key;
        }

        config
    }

    /// Formats a sale's date with the configured format.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = LedgerConfig::default();
    /// assert_eq!(config.format_date(&sale_on_2024_03_05), "05/03/2024");
    /// ```
    pub fn format_date(&self, sale: &Sale) -> String {
        sale.display_date(&self.date_format)
    }

    /// Formats an amount with the configured symbol.
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockroom.ledger/stockroom.db`
/// - **Windows**: `%APPDATA%\stockroom\ledger\data\stockroom.db`
/// - **Linux**: `~/.local/share/ledger/stockroom.db`
///
/// Set `STOCKROOM_DB_PATH` to use a custom path.
pub fn default_database_path() -> DbResult<PathBuf> {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let proj_dirs = ProjectDirs::from("com", "stockroom", "ledger").ok_or_else(|| {
        DbError::ConnectionFailed("Could not determine app data directory".to_string())
    })?;

    Ok(proj_dirs.data_dir().join("stockroom.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.products_key, "products");
        assert_eq!(config.sales_key, "sales");
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn test_overrides() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_LOW_STOCK_THRESHOLD, "12"),
            (ENV_DATE_FORMAT, "%Y-%m-%d"),
            (ENV_SALES_KEY, "shop2.sales"),
        ]));

        assert_eq!(config.low_stock_threshold, 12);
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.sales_key, "shop2.sales");
        assert_eq!(config.products_key, "products");
    }

    #[test]
    fn test_bad_values_ignored() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_LOW_STOCK_THRESHOLD, "lots"),
            (ENV_PRODUCTS_KEY, "   "),
        ]));
        assert_eq!(config, LedgerConfig::default());

        let config = LedgerConfig::from_lookup(lookup(&[(ENV_LOW_STOCK_THRESHOLD, "-1")]));
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn test_format_date() {
        let sale = Sale {
            serial: "T1".to_string(),
            name: "Marble Beige".to_string(),
            kind: "Tile".to_string(),
            quantity: 1,
            total: Money::from_rupees(200),
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        assert_eq!(LedgerConfig::default().format_date(&sale), "05/03/2024");

        let iso = LedgerConfig {
            date_format: "%Y-%m-%d".to_string(),
            ..LedgerConfig::default()
        };
        assert_eq!(iso.format_date(&sale), "2024-03-05");
    }

    #[test]
    fn test_format_currency() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_currency(Money::from_paise(60000)), "₹600.00");
        assert_eq!(config.format_currency(Money::from_paise(1)), "₹0.01");
        assert_eq!(config.format_currency(Money::from_paise(-1234)), "-₹12.34");

        let dollars = LedgerConfig {
            currency_symbol: "$".to_string(),
            ..LedgerConfig::default()
        };
        assert_eq!(dollars.format_currency(Money::from_paise(1234)), "$12.34");
        assert_eq!(
            config.format_currency(Money::from_paise(60050)),
            Money::from_paise(60050).to_string()
        );
    }
}
