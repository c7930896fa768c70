//! Wishlist service.

use chrono::{DateTime, Utc};
use thiserror::Error;

use techshop_core::{ProductId, UserId};

use crate::db::{JsonStore, ProductRepository, RepositoryError, WishlistRepository};
use crate::models::cart::Cart;
use crate::models::product::Product;

/// Errors from wishlist operations.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// The product does not exist in the catalog.
    #[error("product not found")]
    ProductNotFound,

    /// The product is already on the wishlist.
    #[error("product already in wishlist")]
    AlreadyPresent,

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A wishlist entry resolved against the catalog.
#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub product: Product,
    pub added_at: DateTime<Utc>,
}

/// Wishlist service over the wishlist and product collections.
pub struct WishlistService {
    wishlists: WishlistRepository,
    products: ProductRepository,
}

impl WishlistService {
    /// Create a new wishlist service.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            wishlists: WishlistRepository::new(store),
            products: ProductRepository::new(store),
        }
    }

    /// The user's wishlist resolved against the catalog. Saved products
    /// that have since vanished are dropped from the view (existence is
    /// only re-validated here, not on save).
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Repository` on persistence failure.
    pub fn view(&self, user_id: UserId) -> Result<Vec<WishlistEntry>, WishlistError> {
        let wishlist = self.wishlists.for_user(user_id)?;
        let products = self.products.all()?;

        Ok(wishlist
            .items
            .into_iter()
            .filter_map(|item| {
                products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|product| WishlistEntry {
                        product: product.clone(),
                        added_at: item.added_at,
                    })
            })
            .collect())
    }

    /// Number of saved products.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Repository` on persistence failure.
    pub fn count(&self, user_id: UserId) -> Result<usize, WishlistError> {
        Ok(self.wishlists.count(user_id)?)
    }

    /// Save a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::ProductNotFound` for an unknown product and
    /// `WishlistError::AlreadyPresent` for a repeat save (the wishlist is
    /// left unchanged).
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<(), WishlistError> {
        if self.products.get(product_id)?.is_none() {
            return Err(WishlistError::ProductNotFound);
        }

        self.wishlists
            .add(user_id, product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => WishlistError::AlreadyPresent,
                other => WishlistError::Repository(other),
            })
    }

    /// Remove a product from the wishlist.
    ///
    /// Returns `true` if it was present.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Repository` on persistence failure.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, WishlistError> {
        Ok(self.wishlists.remove(user_id, product_id).await?)
    }

    /// Move a product from the wishlist into the cart.
    ///
    /// The product is removed from the wishlist unconditionally; one unit
    /// is added to the cart only when stock allows it. Returns whether the
    /// cart add happened, so an out-of-stock drop is visible to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Repository` on persistence failure.
    pub async fn move_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        cart: &mut Cart,
    ) -> Result<bool, WishlistError> {
        self.wishlists.remove(user_id, product_id).await?;

        let Some(product) = self.products.get(product_id)? else {
            return Ok(false);
        };

        // Stock headroom accounts for units already in the cart
        if product.stock > cart.quantity(product_id) {
            cart.accumulate(product_id, 1);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::product::ProductFields;

    async fn seeded() -> (JsonStore, WishlistService) {
        let store = JsonStore::in_memory();
        let products = ProductRepository::new(&store);
        products
            .create(ProductFields {
                name: "Smartphone".to_string(),
                price: "799.99".parse().unwrap(),
                category: "Electronics".to_string(),
                image: String::new(),
                description: String::new(),
                stock: 25,
            })
            .await
            .unwrap();
        products
            .create(ProductFields {
                name: "Sold Out Thing".to_string(),
                price: "9.99".parse().unwrap(),
                category: "Home".to_string(),
                image: String::new(),
                description: String::new(),
                stock: 0,
            })
            .await
            .unwrap();
        let service = WishlistService::new(&store);
        (store, service)
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (_store, service) = seeded().await;
        let result = service.add(UserId::new(1), ProductId::new(42)).await;
        assert!(matches!(result, Err(WishlistError::ProductNotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_add_signals_and_leaves_unchanged() {
        let (_store, service) = seeded().await;
        let user = UserId::new(1);

        service.add(user, ProductId::new(1)).await.unwrap();
        let result = service.add(user, ProductId::new(1)).await;

        assert!(matches!(result, Err(WishlistError::AlreadyPresent)));
        assert_eq!(service.count(user).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_move_to_cart_in_stock() {
        let (_store, service) = seeded().await;
        let user = UserId::new(1);
        let mut cart = Cart::default();

        service.add(user, ProductId::new(1)).await.unwrap();
        let moved = service
            .move_to_cart(user, ProductId::new(1), &mut cart)
            .await
            .unwrap();

        assert!(moved);
        assert_eq!(cart.quantity(ProductId::new(1)), 1);
        assert_eq!(service.count(user).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_move_to_cart_out_of_stock_removes_without_adding() {
        let (_store, service) = seeded().await;
        let user = UserId::new(1);
        let mut cart = Cart::default();

        service.add(user, ProductId::new(2)).await.unwrap();
        let moved = service
            .move_to_cart(user, ProductId::new(2), &mut cart)
            .await
            .unwrap();

        assert!(!moved);
        assert!(cart.is_empty());
        // Removed from the wishlist all the same
        assert_eq!(service.count(user).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_view_drops_vanished_products() {
        let (store, service) = seeded().await;
        let user = UserId::new(1);

        service.add(user, ProductId::new(1)).await.unwrap();
        service.add(user, ProductId::new(2)).await.unwrap();

        ProductRepository::new(&store)
            .delete(ProductId::new(2))
            .await
            .unwrap();

        let entries = service.view(user).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().unwrap().product.id, ProductId::new(1));
        // The stale record itself is untouched
        assert_eq!(service.count(user).unwrap(), 2);
    }
}
