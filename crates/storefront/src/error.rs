//! Unified error handling.
//!
//! Provides a unified `AppError` type covering the failure taxonomy:
//! not-found, validation, insufficient stock, duplicates, empty-cart
//! checkout, unauthorized access, and storage failures. All route handlers
//! return `Result<T, AppError>`; the response is a JSON failure payload
//! with a matching status code. Storage details are logged, never exposed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::db::orders::StatusError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::checkout::CheckoutError;
use crate::services::wishlist::WishlistError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request failed validation; nothing was applied.
    #[error("{0}")]
    Validation(String),

    /// Requested quantity exceeds current stock.
    #[error("not enough stock for {0}")]
    InsufficientStock(String),

    /// The record already exists (wishlist entry, registration email).
    #[error("{0}")]
    Duplicate(String),

    /// Checkout attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Login required, or credentials rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// Session store failure.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// JSON failure payload, the shape every error response takes.
#[derive(Debug, Serialize)]
struct FailureBody {
    success: bool,
    message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Repository(RepositoryError::NotFound) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Repository(RepositoryError::Conflict(_))
            | Self::InsufficientStock(_)
            | Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::Repository(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::EmptyCart => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn message(&self) -> String {
        match self {
            // Don't expose storage or session internals to clients
            Self::Repository(RepositoryError::Io(_) | RepositoryError::Corrupt { .. })
            | Self::Session(_) => "internal server error".to_owned(),
            Self::Repository(RepositoryError::NotFound) => "not found".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Repository(RepositoryError::Io(_) | RepositoryError::Corrupt { .. })
                | Self::Session(_)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let body = FailureBody {
            success: false,
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::Unauthorized("invalid credentials".to_owned()),
            AuthError::UserNotFound => Self::NotFound("user".to_owned()),
            AuthError::EmailTaken => Self::Duplicate("email already registered".to_owned()),
            AuthError::InvalidEmail(e) => Self::Validation(e.to_string()),
            AuthError::WeakPassword(msg) | AuthError::InvalidInput(msg) => Self::Validation(msg),
            AuthError::Repository(e) => Self::Repository(e),
            AuthError::PasswordHash => Self::Repository(RepositoryError::Io(
                std::io::Error::other("password hashing failed"),
            )),
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::ProductNotFound => Self::NotFound("product".to_owned()),
            CartError::InvalidQuantity => Self::Validation("quantity must be at least 1".to_owned()),
            CartError::InsufficientStock { name } => Self::InsufficientStock(name),
            CartError::Repository(e) => Self::Repository(e),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::MissingField(field) => Self::Validation(format!("{field} is required")),
            CheckoutError::InsufficientStock { name } => Self::InsufficientStock(name),
            CheckoutError::Repository(e) => Self::Repository(e),
        }
    }
}

impl From<WishlistError> for AppError {
    fn from(e: WishlistError) -> Self {
        match e {
            WishlistError::ProductNotFound => Self::NotFound("product".to_owned()),
            WishlistError::AlreadyPresent => {
                Self::Duplicate("product already in wishlist".to_owned())
            }
            WishlistError::Repository(e) => Self::Repository(e),
        }
    }
}

impl From<StatusError> for AppError {
    fn from(e: StatusError) -> Self {
        match e {
            StatusError::InvalidTransition { .. } => Self::Validation(e.to_string()),
            StatusError::Repository(e) => Self::Repository(e),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
