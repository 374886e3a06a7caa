//! Per-provider request and response shaping.
//!
//! [`dialect`] is the only place that maps a [`ProviderKind`] to its wire
//! format. A new provider variant fails to compile until it gets a dialect
//! here and a spec in the registry.

use serde_json::Value;

use duochat_core::{ChatError, ProviderKind};

use crate::anthropic::AnthropicDialect;
use crate::openai::OpenAiDialect;

/// Wire format of one provider's chat endpoint.
pub trait Dialect: Send + Sync {
    /// JSON body for a single-turn request carrying `message` as the user text.
    fn request_body(&self, model: &str, max_tokens: u32, message: &str)
        -> Result<Value, ChatError>;

    /// The assistant's reply text, or `None` if `body` lacks the expected field.
    fn reply_text(&self, body: &Value) -> Option<String>;
}

static ANTHROPIC_DIALECT: AnthropicDialect = AnthropicDialect;
static OPENAI_DIALECT: OpenAiDialect = OpenAiDialect;

/// The dialect spoken by `kind`.
pub fn dialect(kind: ProviderKind) -> &'static dyn Dialect {
    match kind {
        ProviderKind::Anthropic => &ANTHROPIC_DIALECT,
        ProviderKind::OpenAi => &OPENAI_DIALECT,
    }
}
