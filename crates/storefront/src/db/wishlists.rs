//! Wishlist repository.

use chrono::Utc;

use techshop_core::{ProductId, UserId};

use super::{Collection, JsonStore, RepositoryError};
use crate::models::wishlist::{Wishlist, WishlistItem};

/// Collection name for wishlists.
pub const COLLECTION: &str = "wishlists";

/// Repository for per-user wishlists.
#[derive(Clone)]
pub struct WishlistRepository {
    wishlists: Collection<Wishlist>,
}

impl WishlistRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            wishlists: store.collection(COLLECTION),
        }
    }

    /// The user's wishlist; empty if they have never saved anything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn for_user(&self, user_id: UserId) -> Result<Wishlist, RepositoryError> {
        Ok(self
            .wishlists
            .load()?
            .into_iter()
            .find(|w| w.user_id == user_id)
            .unwrap_or_else(|| Wishlist::empty(user_id)))
    }

    /// Number of saved products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn count(&self, user_id: UserId) -> Result<usize, RepositoryError> {
        Ok(self.for_user(user_id)?.items.len())
    }

    /// Save a product to the user's wishlist, creating the record on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already
    /// saved; the wishlist is left unchanged.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<(), RepositoryError> {
        self.wishlists
            .with_mut(|wishlists| {
                let item = WishlistItem {
                    product_id,
                    added_at: Utc::now(),
                };

                if let Some(wishlist) = wishlists.iter_mut().find(|w| w.user_id == user_id) {
                    if wishlist.contains(product_id) {
                        return Err(RepositoryError::Conflict(
                            "product already in wishlist".to_owned(),
                        ));
                    }
                    wishlist.items.push(item);
                } else {
                    let mut wishlist = Wishlist::empty(user_id);
                    wishlist.items.push(item);
                    wishlists.push(wishlist);
                }
                Ok(())
            })
            .await
    }

    /// Remove a product from the user's wishlist.
    ///
    /// Returns `true` if it was present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` on persistence failure.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        self.wishlists
            .with_mut(|wishlists| {
                let Some(wishlist) = wishlists.iter_mut().find(|w| w.user_id == user_id) else {
                    return Ok(false);
                };
                let before = wishlist.items.len();
                wishlist.items.retain(|item| item.product_id != product_id);
                Ok(wishlist.items.len() < before)
            })
            .await
    }
}
