//! # Recommendation Error Types
//!
//! Errors for the fallible edges of vitrina-recs.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Surface                                     │
//! │                                                                         │
//! │  RecommendationEngine ── record / recommend / clear / export           │
//! │  └── total functions, no errors                                        │
//! │                                                                         │
//! │  RecsConfig ── load / save / validate                                  │
//! │  └── InvalidConfig, ConfigSaveFailed, Io, TomlDe, TomlSer              │
//! │                                                                         │
//! │  replay tool ── read input file, print JSON                            │
//! │  └── Io, Json, InvalidInput                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vitrina_core::ValidationError;

/// Result type alias for vitrina-recs operations.
pub type RecsResult<T> = Result<T, RecsError>;

/// Errors raised outside the engine's total operations.
#[derive(Debug, Error)]
pub enum RecsError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value failed validation.
    #[error("Invalid recommendation config: {0}")]
    InvalidConfig(#[source] ValidationError),

    /// No path to write the config to.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Config file is not valid TOML for `RecsConfig`.
    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    // =========================================================================
    // Input / Output Errors
    // =========================================================================
    /// Catalog or purchase data from a file failed validation.
    #[error("Invalid input data: {0}")]
    InvalidInput(#[source] ValidationError),

    /// JSON (de)serialization of snapshots or replay input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system access.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecsError {
    /// Returns true if the error came from bad user-supplied data rather
    /// than the environment (used by the replay tool to pick an exit hint).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RecsError::InvalidConfig(_)
                | RecsError::InvalidInput(_)
                | RecsError::TomlDe(_)
                | RecsError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = RecsError::InvalidConfig(ValidationError::MustBePositive {
            field: "defaults.max_results".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid recommendation config: defaults.max_results must be positive"
        );
        assert!(err.is_user_error());
    }

    #[test]
    fn test_io_is_not_user_error() {
        let err: RecsError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_user_error());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
