//! Response extractor: pulls the assistant's reply out of a provider body.

use serde_json::Value;
use tracing::warn;

use duochat_core::{ChatError, ProviderKind};

use crate::dialect::dialect;

/// Shown in place of a reply when the body lacks the expected field.
pub const FORMAT_ERROR_SENTINEL: &str = "Error: unexpected response format";

/// The reply text, or [`ChatError::UnexpectedFormat`].
pub fn try_extract(kind: ProviderKind, body: &Value) -> Result<String, ChatError> {
    dialect(kind)
        .reply_text(body)
        .ok_or(ChatError::UnexpectedFormat(kind))
}

/// The reply text, or [`FORMAT_ERROR_SENTINEL`] when the body is malformed.
pub fn extract(kind: ProviderKind, body: &Value) -> String {
    match try_extract(kind, body) {
        Ok(text) => text,
        Err(e) => {
            warn!(provider = %kind, error = %e, "reply field missing from response");
            FORMAT_ERROR_SENTINEL.to_string()
        }
    }
}
