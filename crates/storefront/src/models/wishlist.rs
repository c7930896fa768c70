//! Wishlist domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techshop_core::{ProductId, UserId};

/// A saved wishlist entry. Product existence is re-validated at view time,
/// not on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product_id: ProductId,
    /// When the product was saved, stored under the collection key
    /// `added_date`.
    #[serde(rename = "added_date")]
    pub added_at: DateTime<Utc>,
}

/// One wishlist record per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    /// An empty wishlist for a user with no saved products yet.
    #[must_use]
    pub const fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Whether `product_id` is already saved.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }
}
