//! Route handler functions for all API endpoints.
//!
//! Each handler extracts path/body parameters via axum extractors, drives
//! the chat engine through AppState, and returns JSON responses.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solace_chat::SessionSummary;
use solace_core::{helpline_directory, Helpline, Turn};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message for this turn.
    pub message: String,
    /// Session to continue; omitted on the first turn.
    pub session_id: Option<Uuid>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: Uuid,
    pub cited_sources: Vec<String>,
    pub safety_intervention: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelplinesResponse {
    pub helplines: Vec<Helpline>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub default_model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /api/chat - run one conversational turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let (reply, session_id) = state
        .engine
        .handle_message(&body.message, body.session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ChatResponse {
        reply: reply.reply,
        session_id,
        cited_sources: reply.cited_sources,
        safety_intervention: reply.safety_intervention,
    }))
}

/// GET /api/sessions - list live session summaries.
pub async fn sessions(State(state): State<AppState>) -> Json<SessionsResponse> {
    Json(SessionsResponse {
        sessions: state.engine.list_sessions(),
    })
}

/// GET /api/sessions/{id}/history - ordered turns for one session.
pub async fn session_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let turns = state.engine.history(id).map_err(ApiError::from)?;
    Ok(Json(HistoryResponse {
        session_id: id,
        turns,
    }))
}

/// DELETE /api/sessions/{id} - remove a session and its conversation.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResetResponse>, ApiError> {
    state.engine.reset_session(id).map_err(ApiError::from)?;
    tracing::info!("Session {} reset", id);
    Ok(Json(ResetResponse {
        success: true,
        session_id: id,
    }))
}

/// GET /api/helplines - the static helpline directory.
pub async fn helplines() -> Json<HelplinesResponse> {
    Json(HelplinesResponse {
        helplines: helpline_directory(),
    })
}

/// GET /api/models - the configured model listing.
pub async fn models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.config.completion.models.clone(),
        default_model: state.config.completion.model.clone(),
    })
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: "0.1.0".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.engine.list_sessions().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use solace_chat::{ChatEngine, Completer, RemoteError, Retriever};
    use solace_core::{RetrievedPassage, SolaceConfig};

    struct FixedRetriever;

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn search(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<RetrievedPassage>, RemoteError> {
            Ok(vec![RetrievedPassage {
                text: "Slow breathing settles the body.".to_string(),
                source_path: "guides/calm.pdf".to_string(),
                category: "anxiety".to_string(),
            }])
        }
    }

    struct FixedCompleter;

    #[async_trait]
    impl Completer for FixedCompleter {
        async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, RemoteError> {
            Ok("a steady reply".to_string())
        }
    }

    fn make_state() -> AppState {
        let config = SolaceConfig::default();
        let engine = Arc::new(ChatEngine::new(
            &config,
            Arc::new(FixedRetriever),
            Arc::new(FixedCompleter),
        ));
        AppState::new(config, engine)
    }

    fn make_app() -> axum::Router {
        crate::routes::create_router(make_state())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = make_app();
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.active_sessions, 0);
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let app = make_app();
        let resp = app
            .oneshot(
                Request::post("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_unknown_session_not_found() {
        let app = make_app();
        let uri = format!("/api/sessions/{}/history", Uuid::new_v4());
        let resp = app
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
