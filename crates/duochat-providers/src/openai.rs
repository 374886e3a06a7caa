//! OpenAI Chat Completions API (`POST /v1/chat/completions`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use duochat_core::ChatError;

use crate::dialect::Dialect;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

/// Request/response shapes for OpenAI: reply at `choices[0].message.content`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenAiDialect;

impl Dialect for OpenAiDialect {
    fn request_body(
        &self,
        model: &str,
        max_tokens: u32,
        message: &str,
    ) -> Result<Value, ChatError> {
        let payload = ChatCompletionRequest {
            model,
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: message,
            }],
            max_tokens,
        };
        Ok(serde_json::to_value(payload)?)
    }

    fn reply_text(&self, body: &Value) -> Option<String> {
        let parsed = ChatCompletionResponse::deserialize(body).ok()?;
        parsed.choices.into_iter().next()?.message.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = OpenAiDialect
            .request_body("gpt-3.5-turbo", 1000, "hola")
            .unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "hola" }],
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn test_reply_text() {
        let body = json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "hello" },
                "finish_reason": "stop"
            }]
        });
        assert_eq!(OpenAiDialect.reply_text(&body).as_deref(), Some("hello"));
    }

    #[test]
    fn test_reply_text_missing_fields() {
        assert!(OpenAiDialect.reply_text(&json!({})).is_none());
        assert!(OpenAiDialect.reply_text(&json!({ "choices": [] })).is_none());
        assert!(OpenAiDialect
            .reply_text(&json!({ "choices": [{ "message": { "content": null } }] }))
            .is_none());
        assert!(OpenAiDialect
            .reply_text(&json!({ "choices": [{ "delta": { "content": "x" } }] }))
            .is_none());
    }
}
