//! Cart route handlers.
//!
//! The cart lives in the session; every handler loads it, mutates it
//! through the cart service, and writes it back.

use axum::{
    Json,
    extract::State,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use techshop_core::{Price, ProductId};

use crate::error::Result;
use crate::models::cart::Cart;
use crate::models::product::Product;
use crate::models::session::session_keys;
use crate::services::cart::{shipping_fee, total_with_shipping};
use crate::state::AppState;

/// Load the session cart, empty if none exists yet.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// One resolved cart line for display.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub total: Price,
}

/// Cart view data with totals and shipping.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total_with_shipping: Price,
    pub item_count: u32,
}

/// Add-to-cart payload.
#[derive(Debug, Deserialize)]
pub struct AddPayload {
    pub product_id: i32,
    pub quantity: Option<u32>,
}

/// Add-to-cart response, carrying the new badge count.
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub success: bool,
    pub message: String,
    pub cart_count: u32,
}

/// Update-quantity payload. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub product_id: i32,
    pub quantity: i64,
}

/// Remove-line payload.
#[derive(Debug, Deserialize)]
pub struct RemovePayload {
    pub product_id: i32,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CountView {
    pub count: u32,
}

/// Cart contents with line totals, shipping, and grand total.
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    let totals = state.cart().totals(&cart)?;

    Ok(Json(CartView {
        items: totals
            .lines
            .into_iter()
            .map(|line| CartLineView {
                product: line.product,
                quantity: line.quantity,
                total: line.total,
            })
            .collect(),
        subtotal: totals.subtotal,
        shipping: shipping_fee(totals.subtotal),
        total_with_shipping: total_with_shipping(totals.subtotal),
        item_count: cart.item_count(),
    }))
}

/// Add an item to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AddPayload>,
) -> Result<Json<AddResponse>> {
    let product_id = ProductId::new(payload.product_id);
    let quantity = payload.quantity.unwrap_or(1);

    let mut cart = load_cart(&session).await?;
    state.cart().add(&mut cart, product_id, quantity)?;
    save_cart(&session, &cart).await?;

    Ok(Json(AddResponse {
        success: true,
        message: "added to cart".to_owned(),
        cart_count: cart.item_count(),
    }))
}

/// Set a line to an exact quantity; zero or negative removes it.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(payload): Json<UpdatePayload>,
) -> Result<Json<CountView>> {
    let product_id = ProductId::new(payload.product_id);
    let quantity = u32::try_from(payload.quantity).unwrap_or(0);

    let mut cart = load_cart(&session).await?;
    cart.set(product_id, quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CountView {
        count: cart.item_count(),
    }))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(payload): Json<RemovePayload>,
) -> Result<Json<CountView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(ProductId::new(payload.product_id));
    save_cart(&session, &cart).await?;

    Ok(Json(CountView {
        count: cart.item_count(),
    }))
}

/// Cart badge count.
pub async fn count(session: Session) -> Result<Json<CountView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CountView {
        count: cart.item_count(),
    }))
}
