//! Prompt assembly.
//!
//! Pure text construction for the two remote calls: the condense prompt
//! that rewrites windowed history plus the new question into a standalone
//! retrieval query, and the reply prompt that combines persona, history,
//! retrieved context, and the user's input.

use solace_core::{RetrievedPassage, Turn};

// =============================================================================
// Rendering
// =============================================================================

/// Render turns as role-prefixed lines, oldest first.
///
/// Produces `user: ...` / `assistant: ...` lines joined by newlines, or an
/// empty string for an empty slice.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.prefix(), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render retrieved passages as context blocks separated by blank lines.
pub fn render_passages(passages: &[RetrievedPassage]) -> String {
    passages
        .iter()
        .map(|passage| passage.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Distinct source paths of the given passages, in first-seen order.
pub fn cited_sources(passages: &[RetrievedPassage]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for passage in passages {
        if !sources.contains(&passage.source_path) {
            sources.push(passage.source_path.clone());
        }
    }
    sources
}

// =============================================================================
// Templates
// =============================================================================

/// Build the prompt that condenses windowed history and the new question
/// into a single standalone retrieval query.
pub fn condense_prompt(transcript: &str, question: &str) -> String {
    format!(
        "Based on the chat history below and the question, create a query \
         that includes the context:\n\n\
         <chat_history>\n{}\n</chat_history>\n\n\
         <question>\n{}\n</question>\n\n\
         Only return the summary query.",
        transcript, question
    )
}

/// Build the reply prompt: persona preamble, windowed history, retrieved
/// context, and the user's input, in that order.
pub fn reply_prompt(transcript: &str, context: &str, input: &str) -> String {
    format!(
        "You are a compassionate and experienced psychiatrist who provides \
         tailored and empathetic responses.\n\
         Use the CONTEXT below to assist the user. Speak naturally, \
         compassionately, and with sensitivity. Please don't assume anything \
         about relations. Only refer to chat history if there are any \
         relations.\n\n\
         CHAT HISTORY:\n{}\n\n\
         CONTEXT:\n{}\n\n\
         User's Input:\n{}\n\n\
         Your Response:\n",
        transcript, context, input
    )
}

// =============================================================================
// Tests
// =============================================================================
