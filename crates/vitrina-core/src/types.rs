//! # Domain Types
//!
//! Records exchanged between the point-of-sale frontend and the
//! recommendation engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌───────────────────────┐ │
//! │  │ CatalogProduct  │   │  PurchaseEvent  │   │ ProductRecommendation │ │
//! │  │  ─────────────  │   │  ─────────────  │   │  ───────────────────  │ │
//! │  │  id             │   │  id (UUID)      │   │  product_id           │ │
//! │  │  name           │   │  product_ids    │   │  reason / signal      │ │
//! │  │  category       │   │  customer_id?   │   │  confidence [0,1]     │ │
//! │  │  price (Money)  │   │  total?         │   │  price?               │ │
//! │  └─────────────────┘   └─────────────────┘   └───────────────────────┘ │
//! │   caller-supplied        append-only log        ephemeral output       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::validation::{normalize_customer_id, normalize_product_ids};

// =============================================================================
// Catalog Product
// =============================================================================

/// A product as seen by the recommendation engine.
///
/// This is a point-in-time snapshot supplied by the caller; the engine never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Price in cents.
    pub price: Money,
}

impl CatalogProduct {
    /// Creates a catalog entry; `price_cents` is in the smallest currency unit.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        CatalogProduct {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price: Money::from_cents(price_cents),
        }
    }
}

// =============================================================================
// Purchase Event
// =============================================================================

/// One completed sale, as far as recommendations care.
///
/// ## Invariants
/// - `product_ids` is sorted and duplicate-free
/// - Immutable once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseEvent {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Products bought together.
    pub product_ids: Vec<String>,

    /// Absent for walk-in sales.
    pub customer_id: Option<String>,

    /// Informational only; scoring ignores it.
    pub total: Option<Money>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl PurchaseEvent {
    /// Builds an event stamped now, normalising ids on the way in.
    pub fn new<I, S>(product_ids: I, customer_id: Option<&str>, total: Option<Money>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PurchaseEvent {
            id: Uuid::new_v4().to_string(),
            product_ids: normalize_product_ids(product_ids),
            customer_id: normalize_customer_id(customer_id),
            total,
            created_at: Utc::now(),
        }
    }

    /// Re-applies normalisation to an event that came from outside
    /// (e.g. an exported log edited by hand).
    pub fn normalized(mut self) -> Self {
        self.product_ids = normalize_product_ids(&self.product_ids);
        self.customer_id = normalize_customer_id(self.customer_id.as_deref());
        self
    }
}

// =============================================================================
// Recommendation Signal
// =============================================================================

/// Which signal produced (or dominated) a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSignal {
    /// Co-purchased with something in the cart.
    FrequentlyBoughtTogether,
    /// Same category as something in the cart.
    CategoryAffinity,
    /// The customer has bought it before.
    CustomerHistory,
    /// Same category, higher price.
    Upsell,
}

impl std::fmt::Display for RecommendationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSignal::FrequentlyBoughtTogether => write!(f, "frequently_bought_together"),
            RecommendationSignal::CategoryAffinity => write!(f, "category_affinity"),
            RecommendationSignal::CustomerHistory => write!(f, "customer_history"),
            RecommendationSignal::Upsell => write!(f, "upsell"),
        }
    }
}

// =============================================================================
// Product Recommendation
// =============================================================================

/// One ranked suggestion for the current cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecommendation {
    pub product_id: String,

    /// Catalog name, or the id when the catalog does not know the product.
    pub product_name: String,

    /// Human-readable justification shown under the suggestion card.
    pub reason: String,

    /// Signal with the largest contribution to `confidence`.
    pub signal: RecommendationSignal,

    /// Combined score in `[0, 1]`.
    pub confidence: f64,

    /// Catalog price, when known. Always present for upsell suggestions.
    pub price: Option<Money>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_event_normalizes_ids() {
        let event = PurchaseEvent::new(["p3", "p1", "p3"], Some(" c1 "), None);
        assert_eq!(event.product_ids, vec!["p1", "p3"]);
        assert_eq!(event.customer_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_purchase_events_get_distinct_ids() {
        let a = PurchaseEvent::new(["p1"], None, None);
        let b = PurchaseEvent::new(["p1"], None, None);
        assert_ne!(a.id, b.id);
        assert_eq!(a.product_ids, b.product_ids);
    }

    #[test]
    fn test_normalized_repairs_external_event() {
        let raw = PurchaseEvent {
            id: "e1".to_string(),
            product_ids: vec!["b".to_string(), "a".to_string(), "b".to_string()],
            customer_id: Some(String::new()),
            total: Some(Money::from_cents(300)),
            created_at: Utc::now(),
        };
        let event = raw.normalized();
        assert_eq!(event.product_ids, vec!["a", "b"]);
        assert_eq!(event.customer_id, None);
    }

    #[test]
    fn test_signal_serialization() {
        let json = serde_json::to_string(&RecommendationSignal::FrequentlyBoughtTogether).unwrap();
        assert_eq!(json, "\"frequently_bought_together\"");
        assert_eq!(RecommendationSignal::Upsell.to_string(), "upsell");
    }

    #[test]
    fn test_catalog_product_json_shape() {
        let product: CatalogProduct = serde_json::from_str(
            r#"{"id":"p2","name":"Laptop Pro","category":"Electronics","price":1500}"#,
        )
        .unwrap();
        assert_eq!(product, CatalogProduct::new("p2", "Laptop Pro", "Electronics", 1500));
    }
}
