//! Order confirmation and guest tracking handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use techshop_core::OrderId;

use crate::error::{AppError, Result};
use crate::models::order::Order;
use crate::state::AppState;

/// Guest tracking payload: both fields must match the order.
#[derive(Debug, Deserialize)]
pub struct TrackPayload {
    pub order_id: i32,
    pub phone: String,
}

/// Order confirmation view.
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Order>> {
    let order = state
        .orders()
        .get(OrderId::new(id))?
        .ok_or_else(|| AppError::NotFound("order".to_owned()))?;

    Ok(Json(order))
}

/// Guest order tracking by order ID and delivery phone number.
pub async fn track(
    State(state): State<AppState>,
    Json(payload): Json<TrackPayload>,
) -> Result<Json<Order>> {
    let order = state
        .orders()
        .find_for_tracking(OrderId::new(payload.order_id), payload.phone.trim())?
        .ok_or_else(|| AppError::NotFound("order".to_owned()))?;

    Ok(Json(order))
}
