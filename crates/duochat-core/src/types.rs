//! Core types for duochat: provider identifiers, chat messages, and the
//! per-session conversation log.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

// ─────────────────────────────────────────────
// Provider identifiers
// ─────────────────────────────────────────────

/// The closed set of supported LLM vendors.
///
/// Serialized as the lowercase identifier (`"anthropic"`, `"openai"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    OpenAi,
}

impl ProviderKind {
    /// Every supported provider, in selector order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Anthropic, ProviderKind::OpenAi];

    /// The wire identifier for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Vendor environment variable holding this provider's API key.
    pub fn env_key(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ChatError::UnknownProvider(s.to_string()))
    }
}

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message (a reply or a human-readable error).
    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

// ─────────────────────────────────────────────
// Conversation
// ─────────────────────────────────────────────

/// Ordered, append-only chat history for one session.
///
/// Entries are never reordered or deduplicated. The only other mutation is
/// [`Conversation::clear`], which drops everything unconditionally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end of the history.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Discard all history.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// All messages in chronological order.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("anthropic".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" openai ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_provider_kind_unknown() {
        let err = "gemini".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, ChatError::UnknownProvider(ref name) if name == "gemini"));
    }

    #[test]
    fn test_provider_kind_serde() {
        let json = serde_json::to_string(&ProviderKind::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let kind: ProviderKind = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(kind, ProviderKind::Anthropic);
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("hi");
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "hi");
        assert_eq!(Message::assistant("yo").role(), Role::Assistant);
    }

    #[test]
    fn test_conversation_keeps_insertion_order() {
        let mut conv = Conversation::new();
        for i in 0..5 {
            conv.append(Message::user(format!("q{i}")));
            conv.append(Message::assistant(format!("a{i}")));
        }

        assert_eq!(conv.len(), 10);
        for (i, pair) in conv.all().chunks(2).enumerate() {
            assert_eq!(pair[0], Message::user(format!("q{i}")));
            assert_eq!(pair[1], Message::assistant(format!("a{i}")));
        }
    }

    #[test]
    fn test_conversation_keeps_duplicates() {
        let mut conv = Conversation::new();
        conv.append(Message::user("same"));
        conv.append(Message::user("same"));
        assert_eq!(conv.len(), 2);
    }

    #[test]
    fn test_conversation_clear() {
        let mut conv = Conversation::new();
        for _ in 0..7 {
            conv.append(Message::user("x"));
        }
        conv.clear();
        assert!(conv.all().is_empty());
        assert!(conv.is_empty());
        assert!(conv.last().is_none());
    }
}
