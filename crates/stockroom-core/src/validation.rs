//! # Validation Module
//!
//! Input validation for products coming in through an import and for sale
//! quantities typed at the counter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form / import sheet                                          │
//! │  ├── Presence checks, numeric parsing                                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Serial shape, required names                                      │
//! │  └── Non-negative counts and prices                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory                                                    │
//! │  └── Serial exists, quantity <= stock                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_COUNT, MAX_PRICE_PAISE, MAX_SERIAL_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product serial.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - No whitespace (serials are typed or scanned at the counter)
///
/// ```rust
/// use stockroom_core::validation::validate_serial;
///
/// assert!(validate_serial("KJ-6060-WHT").is_ok());
/// assert!(validate_serial("").is_err());
/// assert!(validate_serial("T 1").is_err());
/// ```
pub fn validate_serial(serial: &str) -> ValidationResult<()> {
    if serial.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "serial".to_string(),
        });
    }

    if serial.chars().count() > MAX_SERIAL_LEN {
        return Err(ValidationError::TooLong {
            field: "serial".to_string(),
            max: MAX_SERIAL_LEN,
        });
    }

    if serial.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "serial".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an optional count (stock, boxes, pieces). Blank is allowed.
///
/// Bounded so that count × price stays well inside `i64` paise.
pub fn validate_count(field: &str, value: Option<i64>) -> ValidationResult<()> {
    match value {
        Some(v) if !(0..=MAX_COUNT).contains(&v) => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_COUNT,
        }),
        _ => Ok(()),
    }
}

/// Validates an optional price per box. Zero and blank are allowed.
pub fn validate_price(price: Option<Money>) -> ValidationResult<()> {
    match price {
        Some(p) if !(0..=MAX_PRICE_PAISE).contains(&p.paise()) => {
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_PAISE,
            })
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a whole product record before it enters the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_serial(&product.serial)?;
    validate_product_name(&product.name)?;
    validate_count("stock", product.stock)?;
    validate_count("numBoxes", product.num_boxes)?;
    validate_count("numPieces", product.num_pieces)?;
    validate_price(product.price_per_box)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_serial() {
        assert!(validate_serial("T1").is_ok());
        assert!(validate_serial("KJ-6060_WHT").is_ok());

        assert!(validate_serial("").is_err());
        assert!(validate_serial("   ").is_err());
        assert!(validate_serial("has space").is_err());
        assert!(validate_serial(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Glossy White 600x600").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_counts_and_price() {
        assert!(validate_count("stock", None).is_ok());
        assert!(validate_count("stock", Some(0)).is_ok());
        assert!(validate_count("stock", Some(-1)).is_err());
        assert!(validate_count("stock", Some(MAX_COUNT)).is_ok());
        assert!(validate_count("stock", Some(MAX_COUNT + 1)).is_err());
        assert!(validate_count("stock", Some(i64::MAX)).is_err());

        assert!(validate_price(None).is_ok());
        assert!(validate_price(Some(Money::zero())).is_ok());
        assert!(validate_price(Some(Money::from_paise(-1))).is_err());
        assert!(validate_price(Some(Money::from_paise(MAX_PRICE_PAISE))).is_ok());
        assert!(matches!(
            validate_price(Some(Money::parse("92233720368547758.07").unwrap())),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_product() {
        let good = Product::new("T1", "tile", "Kajaria", "Glossy White").with_stock(10);
        assert!(validate_product(&good).is_ok());

        let negative = good.clone().with_stock(-3);
        assert!(matches!(
            validate_product(&negative),
            Err(ValidationError::OutOfRange { .. })
        ));

        let unnamed = Product::new("T2", "tile", "Kajaria", " ");
        assert!(matches!(
            validate_product(&unnamed),
            Err(ValidationError::Required { .. })
        ));
    }
}
