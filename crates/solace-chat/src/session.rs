//! In-memory session store.
//!
//! Keeps one append-only conversation per session behind a mutex, resolves
//! incoming session ids (reusing live sessions, replacing expired ones),
//! and sweeps out sessions that have been idle past the timeout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone};
use uuid::Uuid;

use solace_core::{Conversation, Turn};

use crate::error::ChatError;
use crate::types::{ChatSession, SessionSummary};

/// Session registry keyed by session id.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
    /// One async lock per session, held for the duration of a turn.
    turn_locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
    /// Idle minutes after which a session is replaced on next contact.
    session_timeout_minutes: u32,
}

impl SessionStore {
    pub fn new(session_timeout_minutes: u32) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            turn_locks: Mutex::new(HashMap::new()),
            session_timeout_minutes,
        }
    }

    /// Resolve or create a session id.
    ///
    /// A known, live id is reused. An expired id is removed and replaced
    /// with a fresh session; an unknown or absent id creates a fresh one.
    pub fn resolve(&self, requested: Option<Uuid>) -> Result<Uuid, ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ChatError::StoreError(format!("session lock poisoned: {}", e)))?;

        if let Some(sid) = requested {
            if let Some(session) = sessions.get(&sid) {
                if !self.is_expired(session) {
                    return Ok(sid);
                }
                sessions.remove(&sid);
                self.turn_locks
                    .lock()
                    .map_err(|e| ChatError::StoreError(format!("turn lock poisoned: {}", e)))?
                    .remove(&sid);
            }
        }

        let session = self.create_session();
        let sid = session.id;
        sessions.insert(sid, session);
        Ok(sid)
    }

    /// Lock serializing turns within one session.
    ///
    /// Callers hold the lock for the whole turn, so concurrent requests
    /// against the same session apply their exchanges one at a time while
    /// other sessions proceed independently.
    pub fn turn_lock(&self, session_id: Uuid) -> Result<Arc<tokio::sync::Mutex<()>>, ChatError> {
        let mut locks = self
            .turn_locks
            .lock()
            .map_err(|e| ChatError::StoreError(format!("turn lock poisoned: {}", e)))?;
        Ok(locks.entry(session_id).or_default().clone())
    }

    /// Get a session by id.
    pub fn get(&self, session_id: Uuid) -> Result<ChatSession, ChatError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| ChatError::StoreError(format!("session lock poisoned: {}", e)))?;
        sessions
            .get(&session_id)
            .cloned()
            .ok_or(ChatError::SessionNotFound(session_id))
    }

    /// Snapshot of a session's conversation.
    ///
    /// The clone lets the caller derive windows and transcripts without
    /// holding the lock across remote calls.
    pub fn conversation(&self, session_id: Uuid) -> Result<Conversation, ChatError> {
        Ok(self.get(session_id)?.conversation)
    }

    /// Append a completed user/assistant exchange to a session.
    ///
    /// A session removed mid-turn is skipped silently; failed turns never
    /// reach this point, so a stored conversation only ever grows by whole
    /// exchanges.
    pub fn append_turns(
        &self,
        session_id: Uuid,
        user: Turn,
        assistant: Turn,
    ) -> Result<(), ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ChatError::StoreError(format!("session lock poisoned: {}", e)))?;
        if let Some(session) = sessions.get_mut(&session_id) {
            session.conversation.push(user);
            session.conversation.push(assistant);
            session.last_message_at = Local::now().timestamp();
        }
        Ok(())
    }

    /// Remove a session and its conversation.
    pub fn reset(&self, session_id: Uuid) -> Result<(), ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ChatError::StoreError(format!("session lock poisoned: {}", e)))?;
        if sessions.remove(&session_id).is_some() {
            self.turn_locks
                .lock()
                .map_err(|e| ChatError::StoreError(format!("turn lock poisoned: {}", e)))?
                .remove(&session_id);
            Ok(())
        } else {
            Err(ChatError::SessionNotFound(session_id))
        }
    }

    /// List all live sessions as summaries.
    pub fn list(&self) -> Vec<SessionSummary> {
        let sessions = match self.sessions.lock() {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        sessions
            .values()
            .map(|s| SessionSummary {
                id: s.id,
                started_at: format_epoch(s.started_at),
                last_message_at: format_epoch(s.last_message_at),
                message_count: s.conversation.len(),
            })
            .collect()
    }

    /// Remove every expired session. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let mut sessions = match self.sessions.lock() {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Session lock poisoned during sweep: {}", e);
                return 0;
            }
        };
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session));
        if let Ok(mut locks) = self.turn_locks.lock() {
            locks.retain(|sid, _| sessions.contains_key(sid));
        }
        before - sessions.len()
    }

    // -- Private helpers --

    fn create_session(&self) -> ChatSession {
        let now = Local::now().timestamp();
        ChatSession {
            id: Uuid::new_v4(),
            started_at: now,
            last_message_at: now,
            conversation: Conversation::new(),
        }
    }

    /// Expiry is strict: a session idle exactly the timeout is still live.
    fn is_expired(&self, session: &ChatSession) -> bool {
        let now = Local::now().timestamp();
        let timeout_secs = i64::from(self.session_timeout_minutes) * 60;
        now - session.last_message_at > timeout_secs
    }
}

/// Format epoch seconds as ISO 8601 string.
fn format_epoch(epoch: i64) -> String {
    chrono::Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt: DateTime<Local>| dt.to_rfc3339())
        .unwrap_or_else(|| epoch.to_string())
}

// =============================================================================
// Tests
// =============================================================================
