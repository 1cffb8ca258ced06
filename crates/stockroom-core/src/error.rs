//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Rejected sales and imports                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  ├── DbError          - Store / database failures                      │
//! │  └── LedgerError      - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError::InvalidSale          │
//! │                          DbError   → LedgerError::Persistence          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// A rejected sale is always one of the first four variants; see
/// [`CoreError::is_invalid_sale`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product carries the requested serial.
    #[error("Unknown serial: {0}")]
    UnknownSerial(String),

    /// Quantity is zero or negative.
    #[error("Invalid quantity {requested}: must be a positive number")]
    InvalidQuantity { requested: i64 },

    /// Insufficient stock to complete sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Record sale (serial: T1, qty: 20)
    ///      │
    ///      ▼
    /// Check stock: available=7
    ///      │
    ///      ▼
    /// InsufficientStock { serial: "T1", available: 7, requested: 20 }
    ///      │
    ///      ▼
    /// UI shows: "Only 7 boxes of T1 in stock"
    /// ```
    #[error("Insufficient stock for {serial}: available {available}, requested {requested}")]
    InsufficientStock {
        serial: String,
        available: i64,
        requested: i64,
    },

    /// quantity × price per box does not fit in the money range.
    #[error("Sale total for {serial} x {requested} is out of range")]
    TotalOverflow { serial: String, requested: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the errors that reject a sale without touching state.
    pub fn is_invalid_sale(&self) -> bool {
        matches!(
            self,
            CoreError::UnknownSerial(_)
                | CoreError::InvalidQuantity { .. }
                | CoreError::InsufficientStock { .. }
                | CoreError::TotalOverflow { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same serial twice in one import).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            serial: "T1".to_string(),
            available: 7,
            requested: 20,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for T1: available 7, requested 20"
        );

        let err = CoreError::UnknownSerial("UNKNOWN".to_string());
        assert_eq!(err.to_string(), "Unknown serial: UNKNOWN");
    }

    #[test]
    fn test_invalid_sale_classification() {
        assert!(CoreError::UnknownSerial("X".into()).is_invalid_sale());
        assert!(CoreError::InvalidQuantity { requested: 0 }.is_invalid_sale());
        assert!(CoreError::InsufficientStock {
            serial: "X".into(),
            available: 1,
            requested: 2
        }
        .is_invalid_sale());

        let validation: CoreError = ValidationError::Required {
            field: "serial".to_string(),
        }
        .into();
        assert!(!validation.is_invalid_sale());
        assert!(matches!(validation, CoreError::Validation(_)));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "serial".to_string(),
            value: "T1".to_string(),
        };
        assert_eq!(err.to_string(), "serial 'T1' already exists");
    }
}
