//! Admin product management.

use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use techshop_core::{Price, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::product::{Product, ProductFields};
use crate::routes::Ack;
use crate::state::AppState;

/// Admin product listing view data.
#[derive(Debug, Serialize)]
pub struct AdminProductsView {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
}

/// Product form data for create and full-field replace.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub stock: u32,
}

impl ProductForm {
    /// Field-level validation: non-empty name and category, non-negative
    /// price. Stock is non-negative by type.
    fn into_fields(self) -> Result<ProductFields> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::Validation("category is required".to_owned()));
        }
        if self.price.is_negative() {
            return Err(AppError::Validation("price cannot be negative".to_owned()));
        }

        Ok(ProductFields {
            name: self.name.trim().to_owned(),
            price: self.price,
            category: self.category.trim().to_owned(),
            image: self.image.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            stock: self.stock,
        })
    }
}

/// Full catalog with categories.
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<AdminProductsView>> {
    let repo = state.products();
    Ok(Json(AdminProductsView {
        products: repo.all()?,
        categories: repo.categories()?,
    }))
}

/// Create a product.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Json<Product>> {
    let product = state.products().create(form.into_fields()?).await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok(Json(product))
}

/// Replace every mutable field of a product.
#[instrument(skip_all, fields(product_id = id))]
pub async fn update(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Json<Product>> {
    let product = state
        .products()
        .update(ProductId::new(id), form.into_fields()?)
        .await?;

    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip_all, fields(product_id = id))]
pub async fn delete(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Ack>> {
    let deleted = state.products().delete(ProductId::new(id)).await?;
    if !deleted {
        return Err(AppError::NotFound("product".to_owned()));
    }

    Ok(Json(Ack::ok("product deleted")))
}
