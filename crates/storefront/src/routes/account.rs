//! Account route handlers.

use axum::{Form, Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use techshop_core::{Email, UserId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::order::Order;
use crate::models::session::session_keys;
use crate::models::user::User;
use crate::routes::Ack;
use crate::state::AppState;

/// User profile view data. Deliberately omits the password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

/// Profile page view data.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: UserView,
    pub orders: Vec<Order>,
    pub wishlist_count: usize,
}

/// Order history view data.
#[derive(Debug, Serialize)]
pub struct OrderHistoryView {
    pub orders: Vec<Order>,
}

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Profile overview: account details, order history, wishlist count.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<ProfileView>> {
    let user = state.auth().get_user(current.id)?;
    let orders = state.orders().for_user(&user)?;
    let wishlist_count = state.wishlists().count(user.id)?;

    Ok(Json(ProfileView {
        user: user.into(),
        orders,
        wishlist_count,
    }))
}

/// Update profile fields, refreshing the session display name.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Result<Json<Ack>> {
    let user = state
        .auth()
        .update_profile(current.id, &form.name, &form.email, form.phone.as_deref())
        .await?;

    session.insert(session_keys::USER_NAME, &user.name).await?;

    Ok(Json(Ack::ok("profile updated")))
}

/// Order history for the logged-in user.
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<OrderHistoryView>> {
    let user = state.auth().get_user(current.id)?;
    let orders = state.orders().for_user(&user)?;

    Ok(Json(OrderHistoryView { orders }))
}
