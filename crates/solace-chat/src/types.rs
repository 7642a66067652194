//! Session and reply types for the chat engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solace_core::Conversation;

/// One user's chat session: identity, activity timestamps, and the full
/// conversation transcript.
///
/// Sessions are isolated from each other; nothing in one conversation is
/// ever visible to another.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    /// Epoch seconds when the session was created.
    pub started_at: i64,
    /// Epoch seconds of the most recent turn.
    pub last_message_at: i64,
    pub conversation: Conversation,
}

/// Summary of a session for listing endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub started_at: String,
    pub last_message_at: String,
    pub message_count: usize,
}

/// Outcome of one successfully handled turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant reply, already trimmed.
    pub reply: String,
    /// Distinct source paths of the passages backing the reply, in
    /// first-seen order. Empty for safety interventions.
    pub cited_sources: Vec<String>,
    /// True when the safety gate produced the reply instead of the model.
    pub safety_intervention: bool,
}
