//! Solace application binary - composition root.
//!
//! Ties together the Solace crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Build the HTTP clients for the retrieval and completion services
//! 3. Construct the chat engine and shared API state
//! 4. Spawn the session-expiry sweep
//! 5. Start the axum REST API server

mod cli;

use std::sync::Arc;

use clap::Parser;

use solace_api::state::AppState;
use solace_chat::ChatEngine;
use solace_core::SolaceConfig;
use solace_providers::{CompletionClient, SearchClient};

use cli::CliArgs;

/// Sweep expired sessions at a fixed cadence.
async fn expiry_sweep_loop(engine: Arc<ChatEngine>, interval_secs: u64) {
    tracing::info!(interval_secs, "Session expiry sweep started");

    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));
    loop {
        interval.tick().await;
        let removed = engine.sweep_expired();
        if removed > 0 {
            tracing::info!(removed, "Expired sessions removed");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. Loaded before tracing init so the log level can come from it.
    let config_file = args.resolve_config_path();
    let mut config = SolaceConfig::load_or_default(&config_file);

    // Tracing. RUST_LOG wins over the resolved log level.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Solace v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // The remote API token may come from the environment instead of the file.
    if let Ok(token) = std::env::var("SOLACE_API_TOKEN") {
        config.remote.api_token = token;
    }
    if config.remote.api_token.is_empty() {
        tracing::warn!("No remote API token configured; remote calls may be rejected");
    }

    // Both remote clients share one connection pool.
    let http = reqwest::Client::new();
    let retriever = Arc::new(SearchClient::with_client(
        config.remote.clone(),
        http.clone(),
    ));
    let completer = Arc::new(CompletionClient::with_client(config.remote.clone(), http));

    let engine = Arc::new(ChatEngine::new(&config, retriever, completer));
    tracing::info!(
        model = %config.completion.model,
        base_url = %config.remote.base_url,
        "Chat engine ready"
    );

    // Session expiry sweep.
    let sweep_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        expiry_sweep_loop(sweep_engine, 60).await;
    });

    // API server.
    let port = args.resolve_port(config.api.port);
    let state = AppState::new(config, engine);

    solace_api::start_server(state, port).await?;

    Ok(())
}
