//! HTTP clients for the hosted retrieval and completion services.
//!
//! Implements the `solace-chat` collaborator traits over reqwest with
//! Bearer auth, so the engine stays transport-agnostic.

pub mod completion;
pub mod search;

mod transport;

pub use completion::{parse_completion_response, CompletionClient};
pub use search::{parse_search_response, SearchClient, SEARCH_COLUMNS};
