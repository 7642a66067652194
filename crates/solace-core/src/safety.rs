//! Crisis keyword screening.
//!
//! Every incoming message is scanned before any remote call is made. A
//! match short-circuits the turn: the engine returns a fixed supportive
//! message and the helpline directory instead of a generated reply.

use crate::config::SafetyConfig;

// =============================================================================
// Constants
// =============================================================================

/// The fixed message returned whenever the gate triggers. Never generated,
/// never varied per input.
pub const SUPPORT_MESSAGE: &str = "I'm really sorry you're feeling this way. \
You're not alone, and help is available. Please consider reaching out to a \
trusted individual or a helpline. A list of mental health helplines is \
available in the helplines directory. Would you like me to provide emergency \
resources?";

// =============================================================================
// Safety gate
// =============================================================================

/// Outcome of screening one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SafetyCheck {
    /// No crisis keyword found; the turn continues through the pipeline.
    Proceed,
    /// A crisis keyword matched; the turn stops here.
    Intervene { keyword: String, message: String },
}

impl SafetyCheck {
    pub fn is_intervention(&self) -> bool {
        matches!(self, SafetyCheck::Intervene { .. })
    }
}

/// Case-insensitive substring scanner over a fixed keyword list.
///
/// Keywords are lowercased once at construction and scanned in their
/// configured order, so the first listed match always wins.
pub struct SafetyGate {
    keywords: Vec<String>,
}

impl SafetyGate {
    pub fn new(config: &SafetyConfig) -> Self {
        Self {
            keywords: config
                .keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Returns the first configured keyword contained in `content`, ignoring
    /// case, or `None` when the message is clean.
    pub fn matched_keyword(&self, content: &str) -> Option<&str> {
        let lowered = content.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .map(|keyword| keyword.as_str())
    }

    /// Screen one message. Matching is plain substring containment, so a
    /// keyword inside a longer word still triggers.
    pub fn check(&self, content: &str) -> SafetyCheck {
        match self.matched_keyword(content) {
            Some(keyword) => SafetyCheck::Intervene {
                keyword: keyword.to_string(),
                message: SUPPORT_MESSAGE.to_string(),
            },
            None => SafetyCheck::Proceed,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
