//! Checkout route handlers.

use axum::{Form, Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use techshop_core::{OrderId, Price};

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::routes::cart::{CartLineView, load_cart, save_cart};
use crate::services::cart::{shipping_fee, total_with_shipping};
use crate::services::checkout::CheckoutForm;
use crate::state::AppState;

/// Checkout summary view data.
#[derive(Debug, Serialize)]
pub struct CheckoutSummaryView {
    pub items: Vec<CartLineView>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total_with_shipping: Price,
}

/// Response after a successfully placed order.
#[derive(Debug, Serialize)]
pub struct OrderPlacedView {
    pub success: bool,
    pub order_id: OrderId,
}

/// Checkout summary: the resolved cart plus shipping. An empty cart
/// cannot be checked out.
pub async fn summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutSummaryView>> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let totals = state.cart().totals(&cart)?;

    Ok(Json(CheckoutSummaryView {
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
    }))
}

/// Place the order: capture prices, decrement stock, persist, clear the
/// cart.
#[instrument(skip_all)]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<OrderPlacedView>> {
    let mut cart = load_cart(&session).await?;

    let order = state
        .checkout()
        .place_order(&mut cart, &form, user.map(|u| u.id))
        .await?;

    save_cart(&session, &cart).await?;

    Ok(Json(OrderPlacedView {
        success: true,
        order_id: order.id,
    }))
}
