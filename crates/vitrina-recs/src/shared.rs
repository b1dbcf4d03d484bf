//! # Shared Engine Handle
//!
//! A cloneable handle for command layers that serve several requests at
//! once (one handle per store session).
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler                    Lock          Engine call                   │
//! │  ───────                    ────          ───────────                   │
//! │  sale completed  ─────────► write ──────► record_purchase()             │
//! │  catalog reload  ─────────► write ──────► set_products()                │
//! │  reset           ─────────► write ──────► clear_history() / restore()   │
//! │  cart changed    ─────────► read  ──────► get_recommendations()         │
//! │  dashboard       ─────────► read  ──────► get_stats() / export_data()   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Unlike a cart (mostly writes), recommendation traffic is read-heavy, so
//! this uses an `RwLock` and concurrent carts never wait on each other.

use std::sync::Arc;

use tokio::sync::RwLock;
use vitrina_core::{CatalogProduct, Money, ProductRecommendation};

use crate::engine::{EngineSnapshot, EngineStats, RecommendationEngine};

/// Cloneable, lock-protected [`RecommendationEngine`].
#[derive(Debug, Clone, Default)]
pub struct SharedRecommendations {
    engine: Arc<RwLock<RecommendationEngine>>,
}

impl SharedRecommendations {
    /// Wraps an existing engine.
    pub fn new(engine: RecommendationEngine) -> Self {
        SharedRecommendations {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Runs `f` with read access to the engine.
    pub async fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RecommendationEngine) -> R,
    {
        let engine = self.engine.read().await;
        f(&engine)
    }

    /// Runs `f` with write access to the engine.
    pub async fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RecommendationEngine) -> R,
    {
        let mut engine = self.engine.write().await;
        f(&mut engine)
    }

    pub async fn record_purchase(
        &self,
        product_ids: Vec<String>,
        customer_id: Option<String>,
        total: Option<Money>,
    ) -> String {
        self.with_engine_mut(|engine| {
            engine.record_purchase(product_ids, customer_id.as_deref(), total)
        })
        .await
    }

    pub async fn set_products(&self, products: Vec<CatalogProduct>) {
        self.with_engine_mut(|engine| engine.set_products(products))
            .await;
    }

    pub async fn get_recommendations(
        &self,
        cart_product_ids: &[String],
        customer_id: Option<&str>,
        min_confidence: Option<f64>,
        max_results: Option<usize>,
    ) -> Vec<ProductRecommendation> {
        self.with_engine(|engine| {
            engine.get_recommendations(cart_product_ids, customer_id, min_confidence, max_results)
        })
        .await
    }

    pub async fn get_stats(&self) -> EngineStats {
        self.with_engine(RecommendationEngine::get_stats).await
    }

    pub async fn export_data(&self) -> EngineSnapshot {
        self.with_engine(RecommendationEngine::export_data).await
    }

    pub async fn clear_history(&self) {
        self.with_engine_mut(RecommendationEngine::clear_history)
            .await;
    }

    pub async fn restore(&self, snapshot: EngineSnapshot) {
        self.with_engine_mut(|engine| engine.restore(snapshot))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_concurrent_writers_are_serialized() {
        let shared = SharedRecommendations::default();

        let mut handles = Vec::new();
        for n in 0..20 {
            let handle = shared.clone();
            handles.push(tokio::spawn(async move {
                let customer = format!("c{}", n % 4);
                handle
                    .record_purchase(ids(&["p1", "p2"]), Some(customer), None)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = shared.get_stats().await;
        assert_eq!(stats.total_purchases, 20);
        assert_eq!(stats.total_associations, 1);
        assert_eq!(stats.tracked_customers, 4);

        let snapshot = shared.export_data().await;
        assert_eq!(snapshot.associations[0].count, 20);
    }

    #[tokio::test]
    async fn test_recommend_through_handle() {
        let shared = SharedRecommendations::new(RecommendationEngine::new());
        shared
            .set_products(vec![
                CatalogProduct::new("p1", "Café", "Bebidas", 250),
                CatalogProduct::new("p2", "Leche", "Lácteos", 120),
            ])
            .await;
        shared
            .record_purchase(ids(&["p1", "p2"]), None, Some(Money::from_cents(370)))
            .await;

        let cart = ids(&["p1"]);
        let recs = shared.get_recommendations(&cart, None, None, None).await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product_name, "Leche");

        shared.clear_history().await;
        assert!(shared
            .get_recommendations(&cart, None, None, None)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_restore_through_handle() {
        let source = SharedRecommendations::default();
        source.record_purchase(ids(&["a", "b"]), None, None).await;
        let snapshot = source.export_data().await;

        let target = SharedRecommendations::default();
        target.restore(snapshot).await;
        assert_eq!(target.get_stats().await.total_purchases, 1);
    }
}
