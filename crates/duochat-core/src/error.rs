//! Error taxonomy shared by every duochat crate.

use thiserror::Error;

use crate::types::ProviderKind;

/// Unified error type for duochat.
///
/// Only `UnknownProvider` and `MissingApiKey` ever stop a turn before it
/// reaches the network. Transport and format failures are turned into an
/// assistant message by the session and the conversation carries on.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The identifier is not one of the supported providers.
    #[error("Unknown provider: {0} (expected one of: anthropic, openai)")]
    UnknownProvider(String),

    /// No usable API key for the selected provider.
    #[error("Missing API key for {0}; enter one with /key or set it in the environment")]
    MissingApiKey(ProviderKind),

    /// Network error, timeout, or non-2xx status.
    #[error("Request failed: {0}")]
    TransportFailure(String),

    /// The provider answered 2xx but the body lacks the expected reply field.
    #[error("Unexpected response format from {0}")]
    UnexpectedFormat(ProviderKind),

    /// A header name or value could not be encoded (usually a malformed key).
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO-related errors.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding/decoding errors.
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl ChatError {
    /// Whether the user can fix this from inside the session.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            ChatError::MissingApiKey(_) | ChatError::UnknownProvider(_) | ChatError::InvalidHeader(_)
        )
    }
}
