//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::TechShopConfig;
use crate::db::{JsonStore, OrderRepository, ProductRepository, UserRepository, WishlistRepository};
use crate::services::{AuthService, CartService, CheckoutService, WishlistService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration, the
/// JSON store, and the repositories and services built over it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TechShopConfig,
    store: JsonStore,
}

impl AppState {
    /// Create application state over the configured data directory.
    #[must_use]
    pub fn new(config: TechShopConfig) -> Self {
        let store = JsonStore::open(&config.data_dir);
        Self::with_store(config, store)
    }

    /// Create application state over an explicit store (used by tests to
    /// swap in the in-memory backend).
    #[must_use]
    pub fn with_store(config: TechShopConfig, store: JsonStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &TechShopConfig {
        &self.inner.config
    }

    /// Get a reference to the JSON store.
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.inner.store
    }

    /// Product repository.
    #[must_use]
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.store())
    }

    /// User repository.
    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store())
    }

    /// Order repository.
    #[must_use]
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store())
    }

    /// Wishlist repository.
    #[must_use]
    pub fn wishlists(&self) -> WishlistRepository {
        WishlistRepository::new(self.store())
    }

    /// Authentication service.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store())
    }

    /// Cart service.
    #[must_use]
    pub fn cart(&self) -> CartService {
        CartService::new(self.store())
    }

    /// Checkout service.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.store())
    }

    /// Wishlist service.
    #[must_use]
    pub fn wishlist(&self) -> WishlistService {
        WishlistService::new(self.store())
    }
}
