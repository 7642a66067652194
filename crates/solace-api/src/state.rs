//! Shared application state for the API server.

use std::sync::Arc;
use std::time::Instant;

use solace_chat::ChatEngine;
use solace_core::SolaceConfig;

/// Shared state passed to all route handlers.
///
/// Cloning is cheap: the engine and config are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<SolaceConfig>,
    /// Chat engine driving every conversational turn.
    pub engine: Arc<ChatEngine>,
    /// Server start time, for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: SolaceConfig, engine: Arc<ChatEngine>) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            start_time: Instant::now(),
        }
    }
}
