//! TechShop Storefront - storefront and admin console.
//!
//! This binary serves the public storefront and the `/admin` console on a
//! single port.
//!
//! # Architecture
//!
//! - Axum web framework; handlers return fully-resolved JSON view data
//! - Flat JSON collection files (`products`, `users`, `orders`,
//!   `wishlists`) under the configured data directory
//! - Cookie-backed sessions (cart, identity, language, theme, admin flag)
//!
//! HTML rendering, translation lookup, and mobile detection are external
//! collaborators consuming the view data this binary produces.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use techshop_storefront::config::TechShopConfig;
use techshop_storefront::middleware::create_session_layer;
use techshop_storefront::routes;
use techshop_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = TechShopConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "techshop_storefront=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(data_dir = %config.data_dir.display(), "Opening JSON store");

    // Create session layer (in-memory store, signed cookies)
    let session_layer = create_session_layer(&config);

    // Build application state
    let state = AppState::new(config.clone());

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the data directory.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
