//! Product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techshop_core::{Price, ProductId, Rating, UserId};

/// A customer review attached to a product.
///
/// One review per user: a second submission by the same user replaces the
/// first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer's user ID.
    pub user_id: UserId,
    /// Reviewer's display name, captured at submission time.
    pub user_name: String,
    /// Star rating, 1-5.
    pub rating: Rating,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
    /// When the review was (last) submitted.
    pub date: DateTime<Utc>,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. Cart and checkout both read the current value; orders
    /// snapshot it into their line items.
    pub price: Price,
    /// Free-text category.
    pub category: String,
    /// Display image reference.
    #[serde(default)]
    pub image: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Units on hand. Decremented at checkout, never below zero.
    pub stock: u32,
    /// Customer reviews.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Average review rating, if any reviews exist.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating.as_u8())).sum();
        #[allow(clippy::cast_precision_loss)] // Review counts stay tiny
        Some(f64::from(sum) / self.reviews.len() as f64)
    }
}

/// Mutable product fields, used for admin create and full-field replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub stock: u32,
}

impl ProductFields {
    /// Apply these fields onto an existing product, keeping its ID and
    /// reviews.
    pub fn apply_to(&self, product: &mut Product) {
        product.name = self.name.clone();
        product.price = self.price;
        product.category = self.category.clone();
        product.image = self.image.clone();
        product.description = self.description.clone();
        product.stock = self.stock;
    }
}
