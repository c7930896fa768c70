//! Domain models.
//!
//! Record types persisted in the JSON collections, plus the session-owned
//! cart. Optional keys carry `#[serde(default)]` so records written by
//! earlier versions of the store still load.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;
pub mod wishlist;

pub use cart::Cart;
pub use order::{NewOrder, Order, OrderItem};
pub use product::{Product, ProductFields, Review};
pub use session::{CurrentUser, session_keys};
pub use user::{NewUser, User};
pub use wishlist::{Wishlist, WishlistItem};
