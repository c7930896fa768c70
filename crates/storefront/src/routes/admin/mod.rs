//! Admin console route handlers.
//!
//! Nested under `/admin`. Every handler except login takes the
//! [`RequireAdmin`] extractor, which checks the `admin_logged_in` session
//! flag.

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Json,
    Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;

use techshop_core::Price;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::order::Order;
use crate::state::AppState;

/// Number of recent orders shown on the dashboard.
const RECENT_ORDERS: usize = 5;

/// Dashboard view data.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_products: usize,
    pub total_orders: usize,
    pub total_revenue: Price,
    pub recent_orders: Vec<Order>,
}

/// Category listing view data.
#[derive(Debug, Serialize)]
pub struct CategoriesView {
    pub categories: Vec<String>,
}

/// Create the admin console router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            post(products::update).delete(products::delete),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/categories", get(categories))
}

/// Dashboard: catalog size, order count, revenue, most recent orders.
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<DashboardView>> {
    let total_products = state.products().all()?.len();
    let orders = state.orders().all()?;

    let total_revenue: Price = orders.iter().map(|o| o.total).sum();
    let recent_orders: Vec<Order> = orders.iter().rev().take(RECENT_ORDERS).cloned().collect();

    Ok(Json(DashboardView {
        total_products,
        total_orders: orders.len(),
        total_revenue,
        recent_orders,
    }))
}

/// Distinct category names.
pub async fn categories(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<CategoriesView>> {
    Ok(Json(CategoriesView {
        categories: state.products().categories()?,
    }))
}
