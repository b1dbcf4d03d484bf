//! # Validation Module
//!
//! Id normalisation and field checks for data entering the engine.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling                                     │
//! │                                                                         │
//! │  Cart / purchase ids (hot path)                                        │
//! │  └── normalise: trim, drop blanks, sort, dedupe  → never fails         │
//! │                                                                         │
//! │  Catalog files, config values (cold path)                              │
//! │  └── validate: required, length, duplicates, ranges → ValidationError  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrina_core::validation::{normalize_product_ids, validate_unit_value};
//!
//! assert_eq!(normalize_product_ids(["b", "a", "b"]), vec!["a", "b"]);
//! assert!(validate_unit_value("weight", 0.4).is_ok());
//! assert!(validate_unit_value("weight", 1.2).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::CatalogProduct;
use crate::MAX_ID_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Normalisation
// =============================================================================

/// Turns raw ids into a sorted set: trimmed, no blanks, no duplicates.
///
/// Purchases and carts are sets, so `["p2", "p1", "p2"]` and `["p1", "p2"]`
/// must describe the same basket.
pub fn normalize_product_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids: Vec<String> = ids
        .into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Trims a customer id; walk-in sales may send `""` instead of nothing.
pub fn normalize_customer_id(customer_id: Option<&str>) -> Option<String> {
    customer_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier from an external file.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_ID_LENGTH`] characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_ID_LENGTH,
        });
    }

    Ok(())
}

/// Validates a catalog snapshot before it is handed to the engine.
///
/// ## Rules
/// - Every id passes [`validate_product_id`]
/// - Ids are unique
/// - Category is not blank
/// - Price is not negative
pub fn validate_catalog(products: &[CatalogProduct]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        validate_product_id(&product.id)?;

        if !seen.insert(product.id.trim()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.clone(),
            });
        }

        if product.category.trim().is_empty() {
            return Err(ValidationError::Required {
                field: format!("category of {}", product.id),
            });
        }

        if product.price.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: format!("price of {}", product.id),
                min: 0,
                max: i64::MAX,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a ratio or weight in `[0, 1]`. NaN is rejected.
pub fn validate_unit_value(field: &str, value: f64) -> ValidationResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::NotAUnitValue {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a count that must be at least one (limits, support thresholds).
pub fn validate_positive_count(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
