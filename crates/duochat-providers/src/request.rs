//! Request builder: turns a target, an API key and the user's text into a
//! ready-to-send HTTP request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use duochat_core::ChatError;

use crate::dialect::dialect;
use crate::registry::{AuthScheme, ProviderTarget};

/// A fully shaped provider request.
///
/// The auth header is marked sensitive, so `Debug` output does not show it.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Build the provider-specific headers and body for one user message.
///
/// The message is not validated; empty or oversized text goes out unchanged
/// and the remote API decides. An empty `api_key` is rejected with
/// [`ChatError::MissingApiKey`].
pub fn build(
    target: &ProviderTarget,
    api_key: &str,
    message: &str,
    max_tokens: u32,
) -> Result<PreparedRequest, ChatError> {
    if api_key.is_empty() {
        return Err(ChatError::MissingApiKey(target.kind()));
    }

    let spec = target.spec();
    let mut headers = HeaderMap::new();
    for (name, value) in spec.base_headers {
        headers.insert(*name, HeaderValue::from_static(*value));
    }

    let (auth_name, raw_value) = match spec.auth {
        AuthScheme::KeyHeader(name) => {
            let name = HeaderName::from_static(name);
            (name, api_key.to_string())
        }
        AuthScheme::Bearer => (AUTHORIZATION, format!("Bearer {api_key}")),
    };
    let mut auth_value = HeaderValue::from_str(&raw_value).map_err(|_| {
        ChatError::InvalidHeader(format!(
            "API key for {} contains characters not allowed in an HTTP header",
            spec.display_name
        ))
    })?;
    auth_value.set_sensitive(true);
    headers.insert(auth_name, auth_value);

    let body = dialect(target.kind()).request_body(target.model(), max_tokens, message)?;

    Ok(PreparedRequest {
        url: target.endpoint().to_string(),
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ANTHROPIC, OPENAI};
    use duochat_core::ProviderKind;
    use serde_json::json;

    #[test]
    fn test_build_anthropic_headers() {
        let req = build(&ProviderTarget::new(&ANTHROPIC), "sk-ant-1", "hi", 1000).unwrap();
        assert_eq!(req.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(req.headers["x-api-key"], "sk-ant-1");
        assert_eq!(req.headers["content-type"], "application/json");
        assert_eq!(req.headers["anthropic-version"], "2023-06-01");
        assert!(req.headers.get(AUTHORIZATION).is_none());
        assert_eq!(req.body["max_tokens"], 1000);
        assert_eq!(req.body["model"], "claude-3-sonnet-20240229");
    }

    #[test]
    fn test_build_openai_headers() {
        let req = build(&ProviderTarget::new(&OPENAI), "sk-oai-1", "hi", 1000).unwrap();
        assert_eq!(req.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(req.headers[AUTHORIZATION], "Bearer sk-oai-1");
        assert_eq!(req.headers["content-type"], "application/json");
        assert!(req.headers.get("x-api-key").is_none());
        assert_eq!(
            req.body["messages"],
            json!([{ "role": "user", "content": "hi" }])
        );
    }

    #[test]
    fn test_build_empty_key() {
        let err = build(&ProviderTarget::new(&OPENAI), "", "hi", 1000).unwrap_err();
        assert!(matches!(err, ChatError::MissingApiKey(ProviderKind::OpenAi)));
    }

    #[test]
    fn test_build_key_with_newline() {
        let err = build(&ProviderTarget::new(&ANTHROPIC), "sk-ant\n1", "hi", 1000).unwrap_err();
        assert!(matches!(err, ChatError::InvalidHeader(_)));
    }

    #[test]
    fn test_auth_header_is_sensitive() {
        let req = build(&ProviderTarget::new(&OPENAI), "sk-oai-secret", "hi", 1000).unwrap();
        assert!(req.headers[AUTHORIZATION].is_sensitive());
        assert!(!format!("{req:?}").contains("sk-oai-secret"));
    }

    #[test]
    fn test_build_uses_target_model() {
        let config = duochat_core::config::ProviderConfig {
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let target = ProviderTarget::from_config(&OPENAI, &config);
        let req = build(&target, "k", "hi", 42).unwrap();
        assert_eq!(req.body["model"], "gpt-4o-mini");
        assert_eq!(req.body["max_tokens"], 42);
    }
}
