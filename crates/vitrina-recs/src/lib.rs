//! # vitrina-recs: Product Recommendations for Vitrina POS
//!
//! Learns which products sell together and suggests additions to the cart
//! being built at the register.
//!
//! ## Signals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Recommendation Signals                           │
//! │                                                                         │
//! │  ┌───────────────────┐  ┌───────────────────┐                          │
//! │  │ Frequently bought │  │ Customer history  │                          │
//! │  │ together          │  │                   │                          │
//! │  │ co(A,B)/support(A)│  │ n/(n+1), n=bought │                          │
//! │  └───────────────────┘  └───────────────────┘                          │
//! │  ┌───────────────────┐  ┌───────────────────┐                          │
//! │  │ Category affinity │  │ Upsell            │   needs a catalog        │
//! │  │ same category     │  │ same category,    │   snapshot               │
//! │  │                   │  │ higher price      │                          │
//! │  └───────────────────┘  └───────────────────┘                          │
//! │                                                                         │
//! │  confidence = min(1, Σ weight × strength)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - `RecommendationEngine`, stats, snapshots
//! - [`association`] - Pairwise co-occurrence index
//! - [`history`] - Per-customer purchase history
//! - [`scoring`] - Signal folding and reason text
//! - [`config`] - Weights and defaults (TOML + env)
//! - [`shared`] - Async `RwLock` handle for concurrent callers
//! - [`error`] - Error types for config and file handling

pub mod association;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod scoring;
pub mod shared;

pub use association::AssociationEntry;
pub use config::{RecsConfig, RequestDefaults, ScoringWeights};
pub use engine::{EngineSnapshot, EngineStats, RecommendationEngine};
pub use error::{RecsError, RecsResult};
pub use shared::SharedRecommendations;
