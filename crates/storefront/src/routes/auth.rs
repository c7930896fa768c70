//! Authentication route handlers.

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use techshop_core::UserId;

use crate::error::Result;
use crate::middleware::{clear_session_user, set_session_user};
use crate::routes::Ack;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Login form data. The identifier may be an email address or a phone
/// number.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email_phone: String,
    pub password: String,
}

/// Response after login or registration.
#[derive(Debug, Serialize)]
pub struct AuthView {
    pub success: bool,
    pub user_id: UserId,
    pub user_name: String,
}

/// Register a new account and log it in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Json<AuthView>> {
    let user = state
        .auth()
        .register(
            &form.name,
            &form.email,
            form.phone.as_deref(),
            &form.password,
        )
        .await?;

    set_session_user(&session, &user).await?;

    Ok(Json(AuthView {
        success: true,
        user_id: user.id,
        user_name: user.name,
    }))
}

/// Login with email or phone plus password.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Json<AuthView>> {
    let user = state
        .auth()
        .login(form.email_phone.trim(), &form.password)
        .await?;

    set_session_user(&session, &user).await?;

    Ok(Json(AuthView {
        success: true,
        user_id: user.id,
        user_name: user.name,
    }))
}

/// Logout: drop the whole session, cart included.
pub async fn logout(session: Session) -> Result<Json<Ack>> {
    clear_session_user(&session).await?;
    session.clear().await;

    Ok(Json(Ack::ok("logged out")))
}
