//! # Customer History
//!
//! What each known customer has bought, derived from the purchase log.

use std::collections::HashMap;

/// Purchase history of one customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerHistory {
    products: HashMap<String, u32>,
}

impl CustomerHistory {
    /// Records one purchase containing `product_ids` (already deduplicated).
    pub fn add_purchase(&mut self, product_ids: &[String]) {
        for id in product_ids {
            *self.products.entry(id.clone()).or_insert(0) += 1;
        }
    }

    /// Purchases this customer made that included the product.
    pub fn times_bought(&self, product_id: &str) -> u32 {
        self.products.get(product_id).copied().unwrap_or(0)
    }

    /// Repeat-purchase strength in `[0, 1)`: `n / (n + 1)` for `n` purchases
    /// of the product.
    ///
    /// Depends only on how often this product was bought, so buying other
    /// things never weakens it.
    pub fn affinity(&self, product_id: &str) -> f64 {
        let times = f64::from(self.times_bought(product_id));
        times / (times + 1.0)
    }

    /// Every product this customer has bought.
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }
}
