//! # Error Types
//!
//! Validation errors for vitrina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrina-core errors (this file)                                       │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  vitrina-recs errors (separate crate)                                  │
//! │  └── RecsError        - Config loading, snapshot I/O                   │
//! │                                                                         │
//! │  Flow: ValidationError → RecsError::InvalidConfig → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine itself never fails: unknown ids and empty carts simply produce
//! no signal. Validation only guards data that comes from files or the UI
//! before it reaches the engine.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Integer value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Ratio or weight outside `[0, 1]` (NaN included).
    #[error("{field} must be between 0 and 1, got {value}")]
    NotAUnitValue { field: String, value: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two catalog rows with one id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product id".to_string(),
        };
        assert_eq!(err.to_string(), "product id is required");

        let err = ValidationError::NotAUnitValue {
            field: "scoring.frequency_weight".to_string(),
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "scoring.frequency_weight must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn test_duplicate_message() {
        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "p1".to_string(),
        };
        assert_eq!(err.to_string(), "product id 'p1' already exists");
    }
}
