//! Admin console login and logout.

use axum::{Form, Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session::session_keys;
use crate::routes::Ack;
use crate::state::AppState;

/// Admin login form data.
#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
}

/// Open an admin console session.
///
/// Only accounts carrying the admin flag are accepted; success sets the
/// `admin_logged_in` session flag the [`crate::middleware::RequireAdmin`]
/// extractor checks.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AdminLoginForm>,
) -> Result<Json<Ack>> {
    let user = state
        .auth()
        .login_admin(form.email.trim(), &form.password)
        .await?;

    session.insert(session_keys::ADMIN_LOGGED_IN, true).await?;
    session
        .insert(session_keys::ADMIN_EMAIL, user.email.as_str())
        .await?;

    tracing::info!(admin = %user.email, "Admin session opened");

    Ok(Json(Ack::ok("admin logged in")))
}

/// Close the admin console session, leaving the shopper session intact.
pub async fn logout(session: Session) -> Result<Json<Ack>> {
    session
        .remove::<bool>(session_keys::ADMIN_LOGGED_IN)
        .await?;
    session.remove::<String>(session_keys::ADMIN_EMAIL).await?;

    Ok(Json(Ack::ok("admin logged out")))
}
