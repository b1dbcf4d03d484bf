//! # Recommendation Engine
//!
//! In-memory purchase log, association index, and customer histories, plus
//! the ranking that turns them into suggestions for the current cart.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sale completed ──► record_purchase() ──┬──► purchases (append-only)    │
//! │                                         ├──► association index          │
//! │                                         └──► customer history           │
//! │                                                                         │
//! │  catalog loaded ──► set_products() ─────────► catalog snapshot          │
//! │                                                                         │
//! │  cart changed ────► get_recommendations() ──► candidates                │
//! │                                               │  (co-purchased,         │
//! │                                               │   customer history,     │
//! │                                               │   same category)        │
//! │                                               ▼                         │
//! │                                   score ─► filter ─► sort ─► truncate   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The engine has no interior locking. Wrap it in
//! [`SharedRecommendations`](crate::SharedRecommendations) to share it
//! between concurrent handlers.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use vitrina_core::validation::{normalize_customer_id, normalize_product_ids};
use vitrina_core::{CatalogProduct, Money, ProductRecommendation, PurchaseEvent};

use crate::association::{AssociationEntry, AssociationIndex};
use crate::config::RecsConfig;
use crate::history::CustomerHistory;
use crate::scoring::{CandidateSignals, HistoryHit};

// =============================================================================
// Stats and Snapshot Records
// =============================================================================

/// Read-only counters for dashboards and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineStats {
    pub total_purchases: usize,
    /// Distinct unordered product pairs with at least one co-purchase.
    pub total_associations: usize,
    pub distinct_products: usize,
    pub tracked_customers: usize,
    pub catalog_size: usize,
    /// Sum of the totals that were supplied with purchases.
    pub recorded_revenue: Money,
}

/// Serializable copy of the engine's history.
///
/// `associations` is derived from `purchases`; [`RecommendationEngine::restore`]
/// recomputes it instead of trusting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineSnapshot {
    pub purchases: Vec<PurchaseEvent>,
    pub associations: Vec<AssociationEntry>,
}

// =============================================================================
// Engine
// =============================================================================

/// Caller-owned recommendation engine.
///
/// ## Example
/// ```rust
/// use vitrina_recs::RecommendationEngine;
///
/// let mut engine = RecommendationEngine::new();
/// for customer in ["c1", "c2", "c3"] {
///     engine.record_purchase(["coffee", "milk"], Some(customer), None);
/// }
///
/// let recs = engine.recommend(&["coffee"], None);
/// assert_eq!(recs[0].product_id, "milk");
/// assert!(recs[0].reason.contains("frecuentemente comprados juntos"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecsConfig,
    purchases: Vec<PurchaseEvent>,
    associations: AssociationIndex,
    customers: HashMap<String, CustomerHistory>,
    catalog: HashMap<String, CatalogProduct>,
}

impl RecommendationEngine {
    /// Creates an empty engine with default scoring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with the given scoring configuration.
    pub fn with_config(config: RecsConfig) -> Self {
        RecommendationEngine {
            config,
            ..Self::default()
        }
    }

    /// Rebuilds an engine from a previously exported purchase log.
    pub fn from_purchases<I>(config: RecsConfig, purchases: I) -> Self
    where
        I: IntoIterator<Item = PurchaseEvent>,
    {
        let mut engine = Self::with_config(config);
        for event in purchases {
            engine.ingest(event.normalized());
        }
        engine
    }

    pub fn config(&self) -> &RecsConfig {
        &self.config
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Records a completed sale and returns the new event's id.
    ///
    /// Duplicate and blank ids are dropped. Each distinct pair in the basket
    /// gains one co-occurrence; the customer's history is updated when a
    /// customer id is given.
    pub fn record_purchase<I, S>(
        &mut self,
        product_ids: I,
        customer_id: Option<&str>,
        total: Option<Money>,
    ) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let event = PurchaseEvent::new(product_ids, customer_id, total);
        let id = event.id.clone();
        self.ingest(event);
        id
    }

    fn ingest(&mut self, event: PurchaseEvent) {
        self.associations.add_basket(&event.product_ids);

        if let Some(customer) = &event.customer_id {
            self.customers
                .entry(customer.clone())
                .or_default()
                .add_purchase(&event.product_ids);
        }

        debug!(
            event_id = %event.id,
            products = event.product_ids.len(),
            customer = ?event.customer_id,
            "Purchase recorded"
        );
        self.purchases.push(event);
    }

    /// Replaces the catalog snapshot. For duplicate ids the last entry wins.
    pub fn set_products<I>(&mut self, products: I)
    where
        I: IntoIterator<Item = CatalogProduct>,
    {
        self.catalog = products
            .into_iter()
            .map(|product| (product.id.trim().to_string(), product))
            .collect();
        info!(products = self.catalog.len(), "Catalog snapshot replaced");
    }

    /// Forgets every purchase. Catalog and configuration are kept.
    pub fn clear_history(&mut self) {
        let dropped = self.purchases.len();
        self.purchases.clear();
        self.associations.clear();
        self.customers.clear();
        info!(dropped, "Purchase history cleared");
    }

    /// Replaces the history with the purchases from `snapshot`.
    pub fn restore(&mut self, snapshot: EngineSnapshot) {
        self.clear_history();
        let expected_pairs = snapshot.associations.len();

        for event in snapshot.purchases {
            self.ingest(event.normalized());
        }

        if expected_pairs != 0 && expected_pairs != self.associations.pair_count() {
            warn!(
                expected_pairs,
                rebuilt_pairs = self.associations.pair_count(),
                "Snapshot associations disagree with its purchase log; using the log"
            );
        }
        info!(purchases = self.purchases.len(), "History restored from snapshot");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Recommendations using the configured defaults.
    pub fn recommend<S: AsRef<str>>(
        &self,
        cart_product_ids: &[S],
        customer_id: Option<&str>,
    ) -> Vec<ProductRecommendation> {
        self.get_recommendations(cart_product_ids, customer_id, None, None)
    }

    /// Ranks suggestions for a cart.
    ///
    /// ## Guarantees
    /// - Nothing already in the cart is suggested
    /// - Empty cart or empty purchase log → empty list
    /// - Every confidence is in `[0, 1]` and `>= min_confidence`
    /// - Sorted by confidence (descending), then product id
    /// - At most `max_results` items
    pub fn get_recommendations<S: AsRef<str>>(
        &self,
        cart_product_ids: &[S],
        customer_id: Option<&str>,
        min_confidence: Option<f64>,
        max_results: Option<usize>,
    ) -> Vec<ProductRecommendation> {
        let cart = normalize_product_ids(cart_product_ids);
        if cart.is_empty() || self.purchases.is_empty() {
            return Vec::new();
        }

        let defaults = &self.config.defaults;
        let min_confidence = min_confidence
            .filter(|v| !v.is_nan())
            .unwrap_or(defaults.min_confidence)
            .clamp(0.0, 1.0);
        let max_results = max_results.unwrap_or(defaults.max_results);
        if max_results == 0 {
            return Vec::new();
        }

        let customer = normalize_customer_id(customer_id)
            .and_then(|id| self.customers.get(&id));
        let in_cart: HashSet<&str> = cart.iter().map(String::as_str).collect();

        let mut candidates: BTreeMap<&str, CandidateSignals> = BTreeMap::new();
        self.collect_frequency(&cart, &in_cart, &mut candidates);
        if let Some(history) = customer {
            self.collect_history(history, &in_cart, &mut candidates);
        }
        self.collect_catalog(&cart, &in_cart, &mut candidates);

        let weights = &self.config.scoring;
        let mut recommendations: Vec<ProductRecommendation> = candidates
            .into_iter()
            .filter_map(|(product_id, signals)| {
                let score = signals.score(weights)?;
                if score.confidence < min_confidence {
                    return None;
                }
                let product = self.catalog.get(product_id);
                Some(ProductRecommendation {
                    product_id: product_id.to_string(),
                    product_name: product
                        .map_or_else(|| product_id.to_string(), |p| p.name.clone()),
                    reason: score.reason,
                    signal: score.signal,
                    confidence: score.confidence,
                    price: product.map(|p| p.price),
                })
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        recommendations.truncate(max_results);

        debug!(
            cart = cart.len(),
            results = recommendations.len(),
            "Recommendations computed"
        );
        recommendations
    }

    /// Frequency signal: best `co(A, B) / support(A)` over cart products A.
    fn collect_frequency<'a>(
        &'a self,
        cart: &[String],
        in_cart: &HashSet<&str>,
        candidates: &mut BTreeMap<&'a str, CandidateSignals>,
    ) {
        let min_support = self.config.scoring.min_support;

        for cart_id in cart {
            let support = self.associations.support(cart_id);
            if support == 0 {
                continue;
            }
            for (other, together) in self.associations.neighbours(cart_id) {
                if together < min_support || in_cart.contains(other) {
                    continue;
                }
                let ratio = f64::from(together) / f64::from(support);
                candidates
                    .entry(other)
                    .or_default()
                    .observe_frequency(ratio, together);
            }
        }
    }

    /// History signal: products this customer bought before.
    fn collect_history<'a>(
        &'a self,
        history: &'a CustomerHistory,
        in_cart: &HashSet<&str>,
        candidates: &mut BTreeMap<&'a str, CandidateSignals>,
    ) {
        for product_id in history.products() {
            if in_cart.contains(product_id) {
                continue;
            }
            candidates.entry(product_id).or_default().history = Some(HistoryHit {
                affinity: history.affinity(product_id),
                times: history.times_bought(product_id),
            });
        }
    }

    /// Category and upsell signals from the catalog snapshot.
    fn collect_catalog<'a>(
        &'a self,
        cart: &[String],
        in_cart: &HashSet<&str>,
        candidates: &mut BTreeMap<&'a str, CandidateSignals>,
    ) {
        if self.catalog.is_empty() {
            return;
        }

        // Cheapest cart price per category; a candidate is an upsell when it
        // costs more than some cart item in its category.
        let mut cheapest: HashMap<&str, Money> = HashMap::new();
        for cart_id in cart {
            if let Some(product) = self.catalog.get(cart_id.as_str()) {
                cheapest
                    .entry(product.category.as_str())
                    .and_modify(|price| *price = (*price).min(product.price))
                    .or_insert(product.price);
            }
        }
        if cheapest.is_empty() {
            return;
        }

        for (product_id, product) in &self.catalog {
            if in_cart.contains(product_id.as_str()) {
                continue;
            }
            let Some(&floor) = cheapest.get(product.category.as_str()) else {
                continue;
            };

            let signals = candidates.entry(product_id.as_str()).or_default();
            signals.category = Some(product.category.clone());
            if product.price > floor {
                signals.upsell = Some(product.category.clone());
            }
        }
    }

    /// Top `limit` products bought together with `product_id`.
    pub fn frequently_bought_with(&self, product_id: &str, limit: usize) -> Vec<AssociationEntry> {
        self.associations.top_for(product_id.trim(), limit)
    }

    /// Aggregate counters.
    pub fn get_stats(&self) -> EngineStats {
        EngineStats {
            total_purchases: self.purchases.len(),
            total_associations: self.associations.pair_count(),
            distinct_products: self.associations.product_count(),
            tracked_customers: self.customers.len(),
            catalog_size: self.catalog.len(),
            recorded_revenue: self.purchases.iter().filter_map(|e| e.total).sum(),
        }
    }

    /// Copy of the purchase log and association index.
    pub fn export_data(&self) -> EngineSnapshot {
        EngineSnapshot {
            purchases: self.purchases.clone(),
            associations: self.associations.entries(),
        }
    }

    /// The recorded purchases, oldest first.
    pub fn purchases(&self) -> &[PurchaseEvent] {
        &self.purchases
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
