//! Authentication extractors.
//!
//! Extractors for requiring a logged-in shopper or an admin console
//! session in route handlers. Identity lives in the session under the
//! `user_id`/`user_name` keys; the admin console is gated by the separate
//! `admin_logged_in` flag.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use techshop_core::UserId;

use crate::models::session::{CurrentUser, session_keys};
use crate::models::user::User;

/// Extractor that requires a logged-in shopper.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for a request without the required session state.
pub struct AuthRejection(&'static str);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": self.0 })),
        )
            .into_response()
    }
}

async fn session_user(session: &Session) -> Option<CurrentUser> {
    let id = session
        .get::<UserId>(session_keys::USER_ID)
        .await
        .ok()
        .flatten()?;
    let name = session
        .get::<String>(session_keys::USER_NAME)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    Some(CurrentUser { id, name })
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection("login required"))?;

        let user = session_user(session)
            .await
            .ok_or(AuthRejection("login required"))?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the logged-in shopper.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Extractor that requires an authenticated admin console session.
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection("admin login required"))?;

        let logged_in = session
            .get::<bool>(session_keys::ADMIN_LOGGED_IN)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if logged_in {
            Ok(Self)
        } else {
            Err(AuthRejection("admin login required"))
        }
    }
}

/// Store the logged-in user's identity in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_session_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER_ID, user.id).await?;
    session.insert(session_keys::USER_NAME, &user.name).await
}

/// Clear the logged-in user's identity from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_session_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<UserId>(session_keys::USER_ID).await?;
    session.remove::<String>(session_keys::USER_NAME).await?;
    Ok(())
}
