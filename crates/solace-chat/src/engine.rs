//! Chat engine: coordinates the per-turn pipeline.
//!
//! Each turn runs sequentially: validate, resolve the session, screen for
//! crisis keywords, derive the context window, condense the query when
//! history exists, retrieve passages, assemble the reply prompt, and
//! complete. A failed stage aborts the turn and leaves the conversation
//! exactly as it was.

use std::sync::Arc;

use uuid::Uuid;

use solace_core::config::{ChatConfig, CompletionConfig, RetrievalConfig};
use solace_core::safety::{SafetyCheck, SafetyGate};
use solace_core::{SolaceConfig, Turn};

use crate::collaborator::{Completer, Retriever};
use crate::error::ChatError;
use crate::prompt;
use crate::session::SessionStore;
use crate::types::{ChatReply, SessionSummary};

/// Central engine driving safety screening, context assembly, and the
/// remote retrieval/completion calls for every turn.
pub struct ChatEngine {
    chat: ChatConfig,
    retrieval: RetrievalConfig,
    completion: CompletionConfig,
    gate: SafetyGate,
    store: SessionStore,
    retriever: Arc<dyn Retriever>,
    completer: Arc<dyn Completer>,
}

impl ChatEngine {
    /// Create a new engine with the given configuration and collaborators.
    pub fn new(
        config: &SolaceConfig,
        retriever: Arc<dyn Retriever>,
        completer: Arc<dyn Completer>,
    ) -> Self {
        Self {
            chat: config.chat.clone(),
            retrieval: config.retrieval.clone(),
            completion: config.completion.clone(),
            gate: SafetyGate::new(&config.safety),
            store: SessionStore::new(config.chat.session_timeout_minutes),
            retriever,
            completer,
        }
    }

    /// Handle one incoming message.
    ///
    /// Returns the reply and the session id (new or existing). Concurrent
    /// calls against the same session are serialized. The user and assistant
    /// turns are appended only after the whole pipeline succeeds, so an
    /// error from any stage leaves the conversation unchanged.
    pub async fn handle_message(
        &self,
        message: &str,
        session_id: Option<Uuid>,
    ) -> Result<(ChatReply, Uuid), ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.len() > self.chat.max_message_length {
            return Err(ChatError::MessageTooLong(self.chat.max_message_length));
        }

        let sid = self.store.resolve(session_id)?;
        let turn_lock = self.store.turn_lock(sid)?;
        let _turn = turn_lock.lock().await;

        // Crisis screening runs before any remote call. A match ends the
        // turn with the fixed supportive message, recorded like any other
        // exchange.
        if let SafetyCheck::Intervene { keyword, message: support } = self.gate.check(message) {
            tracing::info!("Safety gate triggered on {:?} for session {}", keyword, sid);
            self.store.append_turns(
                sid,
                Turn::user(message.to_string()),
                Turn::assistant(support.clone()),
            )?;
            let reply = ChatReply {
                reply: support,
                cited_sources: vec![],
                safety_intervention: true,
            };
            return Ok((reply, sid));
        }

        // Window over the turns recorded before this message.
        let conversation = self.store.conversation(sid)?;
        let window = conversation.window(self.chat.window_turns);
        let transcript = prompt::render_transcript(window);

        // First turn goes to retrieval verbatim; later turns are condensed
        // into a standalone query first.
        let query = if window.is_empty() {
            message.to_string()
        } else {
            let condensed = self
                .completer
                .complete(
                    &self.completion.model,
                    &prompt::condense_prompt(&transcript, message),
                )
                .await
                .map_err(ChatError::Condense)?;
            condensed.trim().to_string()
        };

        let passages = self
            .retriever
            .search(&query, self.retrieval.limit)
            .await
            .map_err(ChatError::Retrieval)?;
        tracing::debug!("Retrieved {} passages for session {}", passages.len(), sid);

        let assembled =
            prompt::reply_prompt(&transcript, &prompt::render_passages(&passages), message);
        let cited = prompt::cited_sources(&passages);

        let completion = self
            .completer
            .complete(&self.completion.model, &assembled)
            .await
            .map_err(ChatError::Completion)?;
        let reply = completion.trim().to_string();

        self.store.append_turns(
            sid,
            Turn::user(message.to_string()),
            Turn::assistant(reply.clone()),
        )?;

        Ok((
            ChatReply {
                reply,
                cited_sources: cited,
                safety_intervention: false,
            },
            sid,
        ))
    }

    /// Full conversation history for a session, oldest first.
    pub fn history(&self, session_id: Uuid) -> Result<Vec<Turn>, ChatError> {
        Ok(self.store.conversation(session_id)?.turns().to_vec())
    }

    /// List all live sessions as summaries.
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.store.list()
    }

    /// Remove a session and its conversation.
    pub fn reset_session(&self, session_id: Uuid) -> Result<(), ChatError> {
        self.store.reset(session_id)
    }

    /// Remove expired sessions. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.store.sweep_expired()
    }
}

// =============================================================================
// Tests
// =============================================================================
