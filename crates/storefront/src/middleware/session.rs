//! Session middleware configuration.
//!
//! Sets up in-memory sessions with signed cookies using tower-sessions.
//! The session is the only home of the cart and login identity; the JSON
//! collections carry everything else.

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::TechShopConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "techshop_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store and signed cookies.
///
/// The signing key comes from the configured session secret, which
/// `TechShopConfig::from_env` has already validated for length and
/// entropy.
#[must_use]
pub fn create_session_layer(
    config: &TechShopConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    // Key::from requires at least 64 bytes of key material;
    // TechShopConfig::from_env enforces the secret length up front
    let key = Key::from(config.session_secret.expose_secret().as_bytes());

    // Only mark the cookie Secure when actually served over HTTPS
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
