//! Anthropic Messages API (`POST /v1/messages`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use duochat_core::ChatError;

use crate::dialect::Dialect;

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Request/response shapes for Anthropic: reply at `content[0].text`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnthropicDialect;

impl Dialect for AnthropicDialect {
    fn request_body(
        &self,
        model: &str,
        max_tokens: u32,
        message: &str,
    ) -> Result<Value, ChatError> {
        let payload = AnthropicRequest {
            model,
            max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: message,
            }],
        };
        Ok(serde_json::to_value(payload)?)
    }

    fn reply_text(&self, body: &Value) -> Option<String> {
        let parsed = AnthropicResponse::deserialize(body).ok()?;
        parsed.content.into_iter().next()?.text
    }
}
