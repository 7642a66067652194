//! Remote collaborator seams.
//!
//! The engine reaches the retrieval and completion services only through
//! these traits, so tests can substitute scripted doubles for the HTTP
//! clients and the pipeline logic stays independent of the transport.

use async_trait::async_trait;

use solace_core::RetrievedPassage;

/// Failure of a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The service could not be reached at all.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service returned status {status}: {message}")]
    Api { status: u16, message: String },
    /// The service answered, but the payload did not have the expected
    /// shape. Never downgraded to an empty result.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Retrieval service: returns the passages most relevant to a query.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>, RemoteError>;
}

/// Completion service: produces model text for an assembled prompt.
///
/// Used twice per turn at most, once to condense the windowed history into
/// a retrieval query and once to generate the reply.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, RemoteError>;
}
