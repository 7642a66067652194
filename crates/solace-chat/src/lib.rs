//! Conversational engine for Solace.
//!
//! Drives the per-turn pipeline of the support chatbot: crisis keyword
//! screening, context window derivation, query condensing, passage
//! retrieval, and reply generation, with in-memory session management.

pub mod collaborator;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod session;
pub mod types;

pub use collaborator::{Completer, RemoteError, Retriever};
pub use engine::ChatEngine;
pub use error::ChatError;
pub use session::SessionStore;
pub use types::{ChatReply, ChatSession, SessionSummary};
