//! Language and theme preference handlers.
//!
//! Preferences only land in the session; translation lookup and theming
//! happen in the rendering layer.

use axum::Json;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::models::session::session_keys;
use crate::routes::Ack;

/// Languages the storefront is translated into, plus browser detection.
const LANGUAGES: &[&str] = &["en", "fr", "ar", "auto"];

/// Supported theme choices.
const THEMES: &[&str] = &["light", "dark", "auto"];

/// Language selection payload.
#[derive(Debug, Deserialize)]
pub struct LanguagePayload {
    pub language: String,
}

/// Theme selection payload.
#[derive(Debug, Deserialize)]
pub struct ThemePayload {
    pub theme: String,
}

/// Store the preferred language in the session.
pub async fn set_language(
    session: Session,
    Json(payload): Json<LanguagePayload>,
) -> Result<Json<Ack>> {
    if !LANGUAGES.contains(&payload.language.as_str()) {
        return Err(AppError::Validation(format!(
            "unsupported language: {}",
            payload.language
        )));
    }

    session
        .insert(session_keys::LANGUAGE, &payload.language)
        .await?;

    Ok(Json(Ack::ok("language updated")))
}

/// Store the preferred theme in the session.
pub async fn set_theme(session: Session, Json(payload): Json<ThemePayload>) -> Result<Json<Ack>> {
    if !THEMES.contains(&payload.theme.as_str()) {
        return Err(AppError::Validation(format!(
            "unsupported theme: {}",
            payload.theme
        )));
    }

    session.insert(session_keys::THEME, &payload.theme).await?;

    Ok(Json(Ack::ok("theme updated")))
}
