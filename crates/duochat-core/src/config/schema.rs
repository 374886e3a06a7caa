//! Configuration schema.
//!
//! Hierarchy: `Config` → `ChatConfig`, `ProvidersConfig` → `ProviderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::credentials::{is_usable_key, Credentials};
use crate::types::ProviderKind;

/// Default cap on generated tokens per reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default HTTP timeout for one provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.duochat/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub chat: ChatConfig,
    pub providers: ProvidersConfig,
}

// ─────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────

/// Session-wide chat settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    /// Provider selected when a session starts.
    pub provider: ProviderKind,
    /// Maximum tokens the provider may generate per reply.
    pub max_tokens: u32,
    /// Timeout for a single request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// User overrides for a single provider.
///
/// `api_key` is read from the file or environment but never serialized back.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Full endpoint URL (overrides the registry default).
    #[serde(alias = "endpoint", skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model name (overrides the registry default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &crate::credentials::mask_secret(&self.api_key))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl ProviderConfig {
    /// Whether this provider has a usable (non-placeholder) API key.
    pub fn is_configured(&self) -> bool {
        is_usable_key(&self.api_key)
    }
}

/// Overrides for both providers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub anthropic: ProviderConfig,
    pub openai: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by kind.
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::OpenAi => &self.openai,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        match kind {
            ProviderKind::Anthropic => &mut self.anthropic,
            ProviderKind::OpenAi => &mut self.openai,
        }
    }

    /// Credentials for `kind`, or `None` when the key is missing or a
    /// placeholder and the user has to enter one manually.
    pub fn credentials(&self, kind: ProviderKind) -> Option<Credentials> {
        Credentials::from_raw(kind, &self.get(kind).api_key)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chat.provider, ProviderKind::Anthropic);
        assert_eq!(config.chat.max_tokens, 1000);
        assert_eq!(config.chat.timeout_secs, 30);
        assert!(!config.providers.anthropic.is_configured());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: Config = serde_json::from_str(
            r#"{
                "chat": { "provider": "openai", "maxTokens": 256, "timeoutSecs": 5 },
                "providers": { "openai": { "apiKey": "sk-1", "apiBase": "http://localhost:9", "model": "gpt-4o" } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.chat.provider, ProviderKind::OpenAi);
        assert_eq!(config.chat.max_tokens, 256);
        assert_eq!(config.chat.timeout_secs, 5);
        assert_eq!(config.providers.openai.api_key, "sk-1");
        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o"));
        assert_eq!(
            config.providers.openai.api_base.as_deref(),
            Some("http://localhost:9")
        );
    }

    #[test]
    fn test_api_base_round_trips_as_camel_case() {
        let config: Config = serde_json::from_str(
            r#"{"providers":{"openai":{"apiBase":"http://127.0.0.1:9/v1/chat/completions"}}}"#,
        )
        .unwrap();
        assert_eq!(
            config.providers.openai.api_base.as_deref(),
            Some("http://127.0.0.1:9/v1/chat/completions")
        );

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"apiBase\":\"http://127.0.0.1:9/v1/chat/completions\""));
    }

    #[test]
    fn test_endpoint_key_still_accepted() {
        let config: Config =
            serde_json::from_str(r#"{"providers":{"anthropic":{"endpoint":"http://localhost:1"}}}"#)
                .unwrap();
        assert_eq!(
            config.providers.anthropic.api_base.as_deref(),
            Some("http://localhost:1")
        );
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.providers.anthropic.api_key = "sk-ant-secret".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-ant-secret"));
        assert!(!json.contains("apiKey"));
    }

    #[test]
    fn test_debug_masks_key() {
        let cfg = ProviderConfig {
            api_key: "sk-ant-secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("secret"));
    }

    #[test]
    fn test_credentials_skip_placeholder() {
        let mut providers = ProvidersConfig::default();
        providers.openai.api_key = "your_openai_api_key_here".to_string();
        providers.anthropic.api_key = "sk-ant-real".to_string();
        assert!(providers.credentials(ProviderKind::OpenAi).is_none());
        assert_eq!(
            providers.credentials(ProviderKind::Anthropic).unwrap().expose(),
            "sk-ant-real"
        );
    }
}
