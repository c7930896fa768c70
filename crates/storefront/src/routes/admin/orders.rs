//! Admin order management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use techshop_core::{OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::order::Order;
use crate::state::AppState;

/// Admin order listing view data.
#[derive(Debug, Serialize)]
pub struct AdminOrdersView {
    pub orders: Vec<Order>,
}

/// Status update payload. Accepts the capitalized status names
/// (`Processing`, `Shipped`, `Delivered`, `Cancelled`).
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

/// All orders, oldest first.
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<AdminOrdersView>> {
    Ok(Json(AdminOrdersView {
        orders: state.orders().all()?,
    }))
}

/// Advance an order's status. Moves the transition table forbids are
/// rejected without touching the order.
#[instrument(skip_all, fields(order_id = id))]
pub async fn update_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Order>> {
    let next: OrderStatus = payload
        .status
        .parse()
        .map_err(AppError::Validation)?;

    let order = state
        .orders()
        .update_status(OrderId::new(id), next)
        .await?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

    Ok(Json(order))
}
