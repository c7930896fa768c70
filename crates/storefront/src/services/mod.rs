//! Domain services.
//!
//! Business logic over the repositories: authentication, cart handling,
//! the checkout pipeline, and wishlist management. Route handlers stay
//! thin; invariants live here and in `db`.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod wishlist;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use checkout::{CheckoutError, CheckoutForm, CheckoutService};
pub use wishlist::{WishlistError, WishlistService};
