//! Session-related types.
//!
//! The session transport supplies a mutable per-client key-value store.
//! These are the keys this application reads and writes.

use serde::{Deserialize, Serialize};

use techshop_core::UserId;

/// Identity of the logged-in shopper, assembled from the `user_id` and
/// `user_name` session keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
}

/// Session keys.
pub mod session_keys {
    /// The shopping cart ([`crate::models::Cart`]).
    pub const CART: &str = "cart";

    /// Logged-in user's ID.
    pub const USER_ID: &str = "user_id";

    /// Logged-in user's display name.
    pub const USER_NAME: &str = "user_name";

    /// Preferred language (`en`, `fr`, `ar`, or `auto`).
    pub const LANGUAGE: &str = "language";

    /// Preferred theme (`light`, `dark`, or `auto`).
    pub const THEME: &str = "theme";

    /// Flag marking an authenticated admin console session.
    pub const ADMIN_LOGGED_IN: &str = "admin_logged_in";

    /// Email the admin console session was opened with.
    pub const ADMIN_EMAIL: &str = "admin_email";
}
