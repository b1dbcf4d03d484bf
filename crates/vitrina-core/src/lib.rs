//! # vitrina-core: Pure Domain Types for Vitrina POS
//!
//! The records that flow between the point-of-sale frontend and the
//! recommendation engine. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vitrina POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (cart screen)                       │   │
//! │  │    Cart UI ──► "También te puede interesar" panel               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ IPC                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vitrina-recs (engine, config)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrina-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Catalog  │  │   Money   │  │ Validation│  │ normalise │  │   │
//! │  │   │  Purchase │  │           │  │   Error   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog entries, purchase events, recommendations
//! - [`money`] - Integer-cent money type
//! - [`error`] - Validation error types
//! - [`validation`] - Id normalisation and field checks
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrina_core::{CatalogProduct, PurchaseEvent};
//!
//! let laptop = CatalogProduct::new("p1", "Laptop", "Electronics", 100_000);
//! assert_eq!(laptop.price.to_string(), "$1000.00");
//!
//! // Duplicates and blanks collapse
//! let event = PurchaseEvent::new(["p2", "p1", "p2", " "], None, None);
//! assert_eq!(event.product_ids, vec!["p1", "p2"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum confidence a suggestion needs when the caller does not pass one.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.1;

/// Number of suggestions returned when the caller does not pass a limit.
///
/// ## Business Reason
/// The cart screen shows a single row of suggestion cards.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Longest product or customer identifier accepted from external input.
pub const MAX_ID_LENGTH: usize = 64;
