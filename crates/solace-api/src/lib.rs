//! Solace API crate - axum HTTP server and route handlers.
//!
//! Provides the REST API for the Solace chatbot: the chat turn endpoint,
//! session listing, history and reset, the helpline directory, the model
//! listing, and health checks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
