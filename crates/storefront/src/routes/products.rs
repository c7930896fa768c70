//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use techshop_core::{ProductId, Rating};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::product::{Product, Review};
use crate::routes::Ack;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

/// Product listing view data.
#[derive(Debug, Serialize)]
pub struct ProductListView {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
}

/// Product detail view data.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: Product,
    pub average_rating: Option<f64>,
}

/// Review submission payload.
#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
    pub rating: u8,
    pub comment: Option<String>,
}

/// Product listing, optionally filtered by category.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductListView>> {
    let repo = state.products();

    let selected = query.category.filter(|c| !c.is_empty());
    let products = match &selected {
        Some(category) => repo.by_category(category)?,
        None => repo.all()?,
    };

    Ok(Json(ProductListView {
        products,
        categories: repo.categories()?,
        selected_category: selected,
    }))
}

/// Product detail with reviews.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetailView>> {
    let product = state
        .products()
        .get(ProductId::new(id))?
        .ok_or_else(|| AppError::NotFound("product".to_owned()))?;

    let average_rating = product.average_rating();

    Ok(Json(ProductDetailView {
        product,
        average_rating,
    }))
}

/// Submit a review. A second review by the same user replaces the first.
#[tracing::instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn add_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewPayload>,
) -> Result<Json<Ack>> {
    let rating = Rating::new(payload.rating).map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .products()
        .upsert_review(
            ProductId::new(id),
            Review {
                user_id: user.id,
                user_name: user.name,
                rating,
                comment: payload.comment.unwrap_or_default(),
                date: Utc::now(),
            },
        )
        .await?;

    Ok(Json(Ack::ok("review added")))
}
