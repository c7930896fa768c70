//! Catalog search handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::product::Product;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search results view data.
#[derive(Debug, Serialize)]
pub struct SearchView {
    pub query: String,
    pub results_count: usize,
    pub products: Vec<Product>,
}

/// Case-insensitive substring search over name, description, and category.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchView>> {
    let needle = query.q.unwrap_or_default().trim().to_owned();
    if needle.is_empty() {
        return Err(AppError::Validation("search query cannot be empty".to_owned()));
    }

    let products = state.products().search(&needle)?;

    Ok(Json(SearchView {
        results_count: products.len(),
        query: needle,
        products,
    }))
}
