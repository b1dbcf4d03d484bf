//! # Association Index
//!
//! Pairwise co-occurrence counts mined from the purchase log.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase {p1, p2, p3}                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  support:   p1 +1   p2 +1   p3 +1                                       │
//! │  pairs:     (p1,p2) +1   (p1,p3) +1   (p2,p3) +1                        │
//! │                                                                         │
//! │  neighbours["p1"] = { p2: 1, p3: 1 }                                    │
//! │  neighbours["p2"] = { p1: 1, p3: 1 }   ← both directions stored,        │
//! │  neighbours["p3"] = { p1: 1, p2: 1 }     one logical counter per pair   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both directions are kept so "what goes with p1?" is one map lookup. They
//! are always incremented together, so `count(a, b) == count(b, a)`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One unordered pair and how many purchases contained both products.
///
/// `product_a` is always the lexicographically smaller id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssociationEntry {
    pub product_a: String,
    pub product_b: String,
    pub count: u32,
}

impl AssociationEntry {
    fn new(x: &str, y: &str, count: u32) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        AssociationEntry {
            product_a: a.to_string(),
            product_b: b.to_string(),
            count,
        }
    }
}

/// Co-occurrence counters plus per-product support.
#[derive(Debug, Clone, Default)]
pub struct AssociationIndex {
    neighbours: HashMap<String, HashMap<String, u32>>,
    support: HashMap<String, u32>,
    pair_count: usize,
}

impl AssociationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one basket. `product_ids` must already be deduplicated.
    pub fn add_basket(&mut self, product_ids: &[String]) {
        for id in product_ids {
            *self.support.entry(id.clone()).or_insert(0) += 1;
        }

        for (i, a) in product_ids.iter().enumerate() {
            for b in &product_ids[i + 1..] {
                if a == b {
                    continue;
                }
                let is_new = self.bump(a, b);
                self.bump(b, a);
                if is_new {
                    self.pair_count += 1;
                }
            }
        }
    }

    /// Increments one direction; returns true if the pair was unseen.
    fn bump(&mut self, from: &str, to: &str) -> bool {
        let row = self.neighbours.entry(from.to_string()).or_default();
        match row.get_mut(to) {
            Some(count) => {
                *count += 1;
                false
            }
            None => {
                row.insert(to.to_string(), 1);
                true
            }
        }
    }

    /// Number of purchases containing the product.
    pub fn support(&self, product_id: &str) -> u32 {
        self.support.get(product_id).copied().unwrap_or(0)
    }

    /// Products ever bought together with `product_id`, with counts.
    pub fn neighbours(&self, product_id: &str) -> impl Iterator<Item = (&str, u32)> {
        self.neighbours
            .get(product_id)
            .into_iter()
            .flat_map(|row| row.iter().map(|(id, count)| (id.as_str(), *count)))
    }

    /// Distinct unordered pairs tracked.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Distinct products seen in any basket.
    pub fn product_count(&self) -> usize {
        self.support.len()
    }

    pub fn clear(&mut self) {
        self.neighbours.clear();
        self.support.clear();
        self.pair_count = 0;
    }

    /// Every pair once, strongest first, ties by ids.
    pub fn entries(&self) -> Vec<AssociationEntry> {
        let mut entries: Vec<AssociationEntry> = self
            .neighbours
            .iter()
            .flat_map(|(a, row)| {
                row.iter()
                    .filter(move |(b, _)| a.as_str() < b.as_str())
                    .map(move |(b, count)| AssociationEntry::new(a, b, *count))
            })
            .collect();
        sort_entries(&mut entries);
        entries
    }

    /// Top `limit` pairs involving `product_id`, strongest first.
    pub fn top_for(&self, product_id: &str, limit: usize) -> Vec<AssociationEntry> {
        let mut entries: Vec<AssociationEntry> = self
            .neighbours(product_id)
            .map(|(other, count)| AssociationEntry::new(product_id, other, count))
            .collect();
        sort_entries(&mut entries);
        entries.truncate(limit);
        entries
    }
}

fn sort_entries(entries: &mut [AssociationEntry]) {
    entries.sort_by(|x, y| {
        y.count
            .cmp(&x.count)
            .then_with(|| x.product_a.cmp(&y.product_a))
            .then_with(|| x.product_b.cmp(&y.product_b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn together(index: &AssociationIndex, a: &str, b: &str) -> u32 {
        index
            .neighbours(a)
            .find(|(other, _)| *other == b)
            .map_or(0, |(_, count)| count)
    }

    #[test]
    fn test_pairs_are_symmetric() {
        let mut index = AssociationIndex::new();
        index.add_basket(&basket(&["p1", "p2", "p3"]));
        index.add_basket(&basket(&["p1", "p2"]));

        assert_eq!(together(&index, "p1", "p2"), 2);
        assert_eq!(together(&index, "p2", "p1"), 2);
        assert_eq!(together(&index, "p2", "p3"), 1);
        assert_eq!(together(&index, "p1", "p9"), 0);
        assert_eq!(index.pair_count(), 3);
    }

    #[test]
    fn test_support_counts_baskets() {
        let mut index = AssociationIndex::new();
        index.add_basket(&basket(&["p1"]));
        index.add_basket(&basket(&["p1", "p2"]));

        assert_eq!(index.support("p1"), 2);
        assert_eq!(index.support("p2"), 1);
        assert_eq!(index.support("p3"), 0);
        assert_eq!(index.product_count(), 2);
        // A single-item basket has no pairs
        assert_eq!(index.pair_count(), 1);
    }

    #[test]
    fn test_entries_are_canonical_and_sorted() {
        let mut index = AssociationIndex::new();
        index.add_basket(&basket(&["b", "c"]));
        index.add_basket(&basket(&["a", "b"]));
        index.add_basket(&basket(&["b", "c"]));

        let entries = index.entries();
        assert_eq!(
            entries,
            vec![
                AssociationEntry::new("b", "c", 2),
                AssociationEntry::new("a", "b", 1),
            ]
        );
        assert_eq!(entries[1].product_a, "a");
    }

    #[test]
    fn test_top_for_limits_and_orders() {
        let mut index = AssociationIndex::new();
        index.add_basket(&basket(&["p1", "p2", "p3"]));
        index.add_basket(&basket(&["p1", "p3"]));

        let top = index.top_for("p3", 1);
        assert_eq!(top, vec![AssociationEntry::new("p1", "p3", 2)]);
        assert!(index.top_for("unknown", 5).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut index = AssociationIndex::new();
        index.add_basket(&basket(&["p1", "p2"]));
        index.clear();

        assert_eq!(index.product_count(), 0);
        assert_eq!(index.pair_count(), 0);
        assert_eq!(together(&index, "p1", "p2"), 0);
    }
}
