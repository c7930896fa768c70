//! Middleware and extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalAuth, RequireAdmin, RequireAuth, clear_session_user, set_session_user};
pub use session::create_session_layer;
