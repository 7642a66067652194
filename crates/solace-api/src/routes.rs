//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression,
//! and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS middleware: allow the configured frontend origin.
    let origins: Vec<HeaderValue> = match state.config.api.allowed_origin.parse::<HeaderValue>() {
        Ok(value) => vec![value],
        Err(_) => {
            tracing::warn!(
                "Invalid allowed_origin {:?} in config; cross-origin requests will be refused",
                state.config.api.allowed_origin
            );
            vec![]
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .route("/api/sessions", get(handlers::sessions))
        .route("/api/sessions/{id}/history", get(handlers::session_history))
        .route("/api/sessions/{id}", delete(handlers::reset_session))
        .route("/api/helplines", get(handlers::helplines))
        .route("/api/models", get(handlers::models))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the given port.
///
/// Binds to 127.0.0.1 (localhost only).
pub async fn start_server(state: AppState, port: u16) -> Result<(), solace_core::SolaceError> {
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| solace_core::SolaceError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| solace_core::SolaceError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
