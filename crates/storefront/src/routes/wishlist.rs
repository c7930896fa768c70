//! Wishlist route handlers.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use techshop_core::ProductId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::product::Product;
use crate::routes::Ack;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// One resolved wishlist entry.
#[derive(Debug, Serialize)]
pub struct WishlistEntryView {
    pub product: Product,
    pub added_date: DateTime<Utc>,
}

/// Wishlist view data.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<WishlistEntryView>,
}

/// Payload naming a product.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub product_id: i32,
}

/// Response for a move-to-cart request. `moved` is false when the product
/// was out of stock: it leaves the wishlist but never reaches the cart.
#[derive(Debug, Serialize)]
pub struct MoveToCartResponse {
    pub success: bool,
    pub moved: bool,
    pub message: String,
}

/// Saved products, resolved against the catalog.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<WishlistView>> {
    let entries = state.wishlist().view(user.id)?;

    Ok(Json(WishlistView {
        items: entries
            .into_iter()
            .map(|entry| WishlistEntryView {
                product: entry.product,
                added_date: entry.added_at,
            })
            .collect(),
    }))
}

/// Save a product to the wishlist.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Ack>> {
    state
        .wishlist()
        .add(user.id, ProductId::new(payload.product_id))
        .await?;

    Ok(Json(Ack::ok("added to wishlist")))
}

/// Remove a product from the wishlist.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Ack>> {
    state
        .wishlist()
        .remove(user.id, ProductId::new(payload.product_id))
        .await?;

    Ok(Json(Ack::ok("removed from wishlist")))
}

/// Move a product from the wishlist into the cart.
#[instrument(skip(state, session, user), fields(user_id = %user.id))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<MoveToCartResponse>> {
    let mut cart = load_cart(&session).await?;

    let moved = state
        .wishlist()
        .move_to_cart(user.id, ProductId::new(payload.product_id), &mut cart)
        .await?;

    save_cart(&session, &cart).await?;

    let message = if moved {
        "moved to cart".to_owned()
    } else {
        "removed from wishlist, but currently out of stock".to_owned()
    };

    Ok(Json(MoveToCartResponse {
        success: true,
        moved,
        message,
    }))
}
