//! Home page handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::models::product::Product;
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page view data.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured_products: Vec<Product>,
}

/// Featured products: the first few catalog entries.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeView>> {
    let mut products = state.products().all()?;
    products.truncate(FEATURED_COUNT);

    Ok(Json(HomeView {
        featured_products: products,
    }))
}
