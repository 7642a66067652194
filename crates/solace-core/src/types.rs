use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// The author of a conversation turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person seeking support.
    User,
    /// The chatbot reply.
    Assistant,
}

impl Role {
    /// Returns the prefix used when rendering a transcript line.
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

// =============================================================================
// Conversation
// =============================================================================

/// A single utterance in a conversation. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: String) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }
}

/// An ordered, append-only sequence of turns owned by one session.
///
/// Turns are never reordered or mutated in place; the length is
/// monotonically non-decreasing for the lifetime of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a turn to the end of the conversation.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Number of turns recorded so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The trailing context window: the last `k` turns, or fewer when the
    /// conversation is shorter. Recomputed on every call; never cached.
    pub fn window(&self, k: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(k);
        &self.turns[start..]
    }
}

// =============================================================================
// Retrieval
// =============================================================================

/// A supporting passage returned by the retrieval service.
///
/// Read-only and scoped to a single request; passages are never cached
/// across turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// The passage text.
    pub text: String,
    /// Path of the source document the passage was extracted from.
    pub source_path: String,
    /// Topical category assigned by the indexing pipeline.
    pub category: String,
}

// =============================================================================
// Helplines
// =============================================================================

/// A crisis helpline entry in the static directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Helpline {
    pub region: String,
    pub organization: String,
    pub contact: String,
}

/// The static mental health helpline directory, surfaced alongside safety
/// interventions and via the helplines endpoint.
pub fn helpline_directory() -> Vec<Helpline> {
    let entries = [
        ("USA", "National Suicide Prevention Lifeline", "988"),
        ("UK", "Samaritans", "116 123"),
        ("India", "AASRA", "91-9820466726"),
        ("Canada", "Talk Suicide Canada", "1-833-456-4566"),
        ("Australia", "Lifeline", "13 11 14"),
        (
            "Global",
            "Befrienders Worldwide",
            "https://www.befrienders.org",
        ),
    ];
    entries
        .iter()
        .map(|(region, organization, contact)| Helpline {
            region: region.to_string(),
            organization: organization.to_string(),
            contact: contact.to_string(),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"user\"");

        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let deserialized: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(deserialized, Role::User);
    }

    #[test]
    fn test_role_prefix() {
        assert_eq!(Role::User.prefix(), "user");
        assert_eq!(Role::Assistant.prefix(), "assistant");
    }

    #[test]
    fn test_turn_constructors() {
        let t = Turn::user("I had a rough week".to_string());
        assert_eq!(t.role, Role::User);
        assert_eq!(t.content, "I had a rough week");

        let t = Turn::assistant("That sounds difficult".to_string());
        assert_eq!(t.role, Role::Assistant);
        assert_eq!(t.content, "That sounds difficult");
    }

    #[test]
    fn test_conversation_starts_empty() {
        let conv = Conversation::new();
        assert!(conv.is_empty());
        assert_eq!(conv.len(), 0);
        assert!(conv.turns().is_empty());
    }

    #[test]
    fn test_conversation_append_preserves_order() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("first".to_string()));
        conv.push(Turn::assistant("second".to_string()));
        conv.push(Turn::user("third".to_string()));

        assert_eq!(conv.len(), 3);
        assert_eq!(conv.turns()[0].content, "first");
        assert_eq!(conv.turns()[1].content, "second");
        assert_eq!(conv.turns()[2].content, "third");
    }

    // ---- Window ----

    #[test]
    fn test_window_length_is_min_of_k_and_len() {
        for len in 0..=10usize {
            let mut conv = Conversation::new();
            for i in 0..len {
                conv.push(Turn::user(format!("turn {}", i)));
            }
            for k in 0..=10usize {
                assert_eq!(
                    conv.window(k).len(),
                    k.min(len),
                    "window({}) on conversation of length {}",
                    k,
                    len
                );
            }
        }
    }

    #[test]
    fn test_window_returns_most_recent_turns() {
        let mut conv = Conversation::new();
        for i in 0..5 {
            conv.push(Turn::user(format!("turn {}", i)));
        }
        let window = conv.window(2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].content, "turn 3");
        assert_eq!(window[1].content, "turn 4");
    }

    #[test]
    fn test_window_larger_than_conversation() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("only one".to_string()));
        let window = conv.window(7);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].content, "only one");
    }

    #[test]
    fn test_window_zero() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("hello".to_string()));
        assert!(conv.window(0).is_empty());
    }

    #[test]
    fn test_window_on_empty_conversation() {
        let conv = Conversation::new();
        assert!(conv.window(7).is_empty());
    }

    #[test]
    fn test_conversation_json_round_trip() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("how are you".to_string()));
        conv.push(Turn::assistant("here to listen".to_string()));

        let json = serde_json::to_string(&conv).unwrap();
        let deserialized: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(conv, deserialized);
    }

    // ---- Passages ----

    #[test]
    fn test_passage_json_round_trip() {
        let passage = RetrievedPassage {
            text: "Grounding exercises can reduce acute anxiety.".to_string(),
            source_path: "guides/anxiety.pdf".to_string(),
            category: "anxiety".to_string(),
        };
        let json = serde_json::to_string(&passage).unwrap();
        let deserialized: RetrievedPassage = serde_json::from_str(&json).unwrap();
        assert_eq!(passage, deserialized);
    }

    // ---- Helplines ----

    #[test]
    fn test_helpline_directory_entries() {
        let directory = helpline_directory();
        assert_eq!(directory.len(), 6);

        let regions: Vec<&str> = directory.iter().map(|h| h.region.as_str()).collect();
        assert_eq!(
            regions,
            vec!["USA", "UK", "India", "Canada", "Australia", "Global"]
        );
    }

    #[test]
    fn test_helpline_directory_contacts() {
        let directory = helpline_directory();
        let usa = directory.iter().find(|h| h.region == "USA").unwrap();
        assert_eq!(usa.contact, "988");

        let uk = directory.iter().find(|h| h.region == "UK").unwrap();
        assert_eq!(uk.organization, "Samaritans");
        assert_eq!(uk.contact, "116 123");

        let global = directory.iter().find(|h| h.region == "Global").unwrap();
        assert!(global.contact.contains("befrienders.org"));
    }

    #[test]
    fn test_helpline_serialization() {
        let directory = helpline_directory();
        let json = serde_json::to_string(&directory).unwrap();
        assert!(json.contains("\"region\":\"USA\""));
        assert!(json.contains("988"));

        let deserialized: Vec<Helpline> = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, directory);
    }
}
