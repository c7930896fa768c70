//! Session-owned shopping cart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use techshop_core::ProductId;

/// The shopping cart stored in the session under the `cart` key.
///
/// A mapping of product id (as a string key, the way the session transport
/// stores it) to a positive quantity. Entries with quantity zero are
/// deleted, not zeroed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<String, u32>);

impl Cart {
    fn key(product_id: ProductId) -> String {
        product_id.to_string()
    }

    /// Quantity currently in the cart for `product_id` (zero if absent).
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.0.get(&Self::key(product_id)).copied().unwrap_or(0)
    }

    /// Add `quantity` units on top of whatever is already in the cart.
    pub fn accumulate(&mut self, product_id: ProductId, quantity: u32) {
        *self.0.entry(Self::key(product_id)).or_insert(0) += quantity;
    }

    /// Set the line to an exact quantity. Zero removes the line entirely.
    pub fn set(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.0.remove(&Self::key(product_id));
        } else {
            self.0.insert(Self::key(product_id), quantity);
        }
    }

    /// Remove the line for `product_id`.
    pub fn remove(&mut self, product_id: ProductId) {
        self.0.remove(&Self::key(product_id));
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.0.values().sum()
    }

    /// Cart lines as typed (product id, quantity) pairs. Keys that no
    /// longer parse as product ids are skipped.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.0
            .iter()
            .filter_map(|(key, &quantity)| key.parse::<ProductId>().ok().map(|id| (id, quantity)))
    }
}
