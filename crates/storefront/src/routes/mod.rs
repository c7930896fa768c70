//! HTTP route handlers.
//!
//! Handlers return fully-resolved JSON view data; HTML rendering is an
//! external collaborator. Failures come back as
//! `{"success": false, "message": ...}` with a matching status code.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Featured products
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /products                - Product listing (?category= filter)
//! GET  /products/{id}           - Product detail with reviews
//! POST /products/{id}/reviews   - Submit a review (auth)
//! GET  /search?q=               - Search by name/description/category
//!
//! # Cart
//! GET  /cart                    - Cart with totals and shipping
//! POST /cart/add                - Add item
//! POST /cart/update             - Set quantity (0 removes)
//! POST /cart/remove             - Remove item
//! GET  /cart/count              - Cart badge count
//!
//! # Checkout & orders
//! GET  /checkout                - Checkout summary
//! POST /checkout                - Place order
//! GET  /orders/{id}             - Order confirmation
//! POST /orders/track            - Guest tracking (order id + phone)
//!
//! # Auth & account
//! POST /auth/register           - Register (logs in)
//! POST /auth/login              - Login (email or phone)
//! POST /auth/logout             - Logout
//! GET  /account                 - Profile, order history, wishlist count
//! POST /account                 - Update profile
//! GET  /account/orders          - Order history
//!
//! # Wishlist (auth)
//! GET  /wishlist                - Saved products
//! POST /wishlist/add            - Save product
//! POST /wishlist/remove         - Remove product
//! POST /wishlist/move-to-cart   - Move into cart (if in stock)
//!
//! # Settings
//! POST /settings/language       - en | fr | ar | auto
//! POST /settings/theme          - light | dark | auto
//!
//! # Admin console (admin_logged_in session flag)
//! POST   /admin/login
//! POST   /admin/logout
//! GET    /admin/dashboard       - Counts, revenue, recent orders
//! GET    /admin/products
//! POST   /admin/products        - Create
//! POST   /admin/products/{id}   - Full field replace
//! DELETE /admin/products/{id}
//! GET    /admin/orders
//! POST   /admin/orders/{id}/status
//! GET    /admin/categories
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod products;
pub mod search;
pub mod settings;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// JSON acknowledgement payload for mutations.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    /// A successful acknowledgement.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", post(products::add_review))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index).post(account::update))
        .route("/orders", get(account::orders))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/move-to-cart", post(wishlist::move_to_cart))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/language", post(settings::set_language))
        .route("/theme", post(settings::set_theme))
}

/// Create all routes for the storefront and admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .nest("/products", product_routes())
        .route("/search", get(search::search))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout and orders
        .route("/checkout", get(checkout::summary).post(checkout::place))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/track", post(orders::track))
        // Auth and account
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        // Wishlist
        .nest("/wishlist", wishlist_routes())
        // Settings
        .nest("/settings", settings_routes())
        // Admin console
        .nest("/admin", admin::routes())
}
