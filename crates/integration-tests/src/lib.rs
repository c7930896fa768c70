//! Integration tests for TechShop.
//!
//! The tests exercise the storefront library end to end over a real data
//! directory: repositories, services, and the JSON files they leave on
//! disk. No HTTP server is involved; handlers are thin wrappers over
//! exactly these calls.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart accumulation, shipping, the order pipeline
//! - `wishlist_flow` - Save, duplicate rejection, move-to-cart
//! - `admin_flow` - Admin login, product CRUD, status transitions
//! - `store_files` - On-disk format, durability, corruption surfacing

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use tempfile::TempDir;

use techshop_core::Price;
use techshop_storefront::db::{JsonStore, ProductRepository};
use techshop_storefront::models::product::ProductFields;

/// A data directory on disk plus a store over it.
///
/// The directory lives as long as the context; dropping it cleans up.
pub struct TestContext {
    dir: TempDir,
    pub store: JsonStore,
}

impl TestContext {
    /// Create a context over a fresh temporary data directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp data dir");
        let store = JsonStore::open(dir.path());
        Self { dir, store }
    }

    /// Path of the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Seed the catalog with a small fixed set of products.
    ///
    /// IDs are assigned 1..=4 in order: laptop (15 in stock), mouse (50),
    /// mug (100), and a sold-out poster (0).
    pub async fn seed_catalog(&self) {
        let products = ProductRepository::new(&self.store);
        for (name, price, category, stock) in [
            ("Gaming Laptop", "1299.99", "Electronics", 15),
            ("Wireless Mouse", "49.99", "Electronics", 50),
            ("Coffee Mug", "14.99", "Home", 100),
            ("Sold Out Poster", "9.99", "Home", 0),
        ] {
            products
                .create(ProductFields {
                    name: name.to_string(),
                    price: price.parse::<Price>().unwrap(),
                    category: category.to_string(),
                    image: String::new(),
                    description: String::new(),
                    stock,
                })
                .await
                .unwrap();
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
