//! Provider registry: static specs for the two supported LLM vendors.
//!
//! Each `ProviderSpec` describes how to reach a provider: endpoint, default
//! model, authentication scheme and fixed headers. The request/response
//! shapes live in the matching [`crate::dialect`].

use duochat_core::config::ProviderConfig;
use duochat_core::{ChatError, ProviderKind};

// ─────────────────────────────────────────────
// ProviderSpec: static metadata for one provider
// ─────────────────────────────────────────────

/// How the API key is attached to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// The raw key goes into a vendor-specific header (e.g. `x-api-key`).
    KeyHeader(&'static str),
    /// `Authorization: Bearer <key>`.
    Bearer,
}

/// Static specification describing one LLM provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    /// Human-readable name for logs and the status screen.
    pub display_name: &'static str,
    /// Full URL of the chat endpoint.
    pub endpoint: &'static str,
    /// Model used unless the user config overrides it.
    pub default_model: &'static str,
    pub auth: AuthScheme,
    /// Headers sent with every request, before authentication is added.
    pub base_headers: &'static [(&'static str, &'static str)],
}

impl ProviderSpec {
    /// Internal name (e.g. `"anthropic"`).
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Environment variable holding the API key.
    pub fn env_key(&self) -> &'static str {
        self.kind.env_key()
    }
}

pub static ANTHROPIC: ProviderSpec = ProviderSpec {
    kind: ProviderKind::Anthropic,
    display_name: "Anthropic",
    endpoint: "https://api.anthropic.com/v1/messages",
    default_model: "claude-3-sonnet-20240229",
    auth: AuthScheme::KeyHeader("x-api-key"),
    base_headers: &[
        ("content-type", "application/json"),
        ("anthropic-version", "2023-06-01"),
    ],
};

pub static OPENAI: ProviderSpec = ProviderSpec {
    kind: ProviderKind::OpenAi,
    display_name: "OpenAI",
    endpoint: "https://api.openai.com/v1/chat/completions",
    default_model: "gpt-3.5-turbo",
    auth: AuthScheme::Bearer,
    base_headers: &[("content-type", "application/json")],
};

/// All supported providers, in selector order.
pub static PROVIDERS: [&ProviderSpec; 2] = [&ANTHROPIC, &OPENAI];

// ─────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────

/// The spec for a provider kind.
pub fn spec_for(kind: ProviderKind) -> &'static ProviderSpec {
    match kind {
        ProviderKind::Anthropic => &ANTHROPIC,
        ProviderKind::OpenAi => &OPENAI,
    }
}

/// Find a provider spec by identifier (`"anthropic"` or `"openai"`).
pub fn lookup(identifier: &str) -> Result<&'static ProviderSpec, ChatError> {
    identifier.parse::<ProviderKind>().map(spec_for)
}

// ─────────────────────────────────────────────
// ProviderTarget: spec + user overrides
// ─────────────────────────────────────────────

/// A provider spec with the endpoint and model actually used for requests.
#[derive(Clone, Debug)]
pub struct ProviderTarget {
    spec: &'static ProviderSpec,
    endpoint: String,
    model: String,
}

impl ProviderTarget {
    /// Target with the registry defaults.
    pub fn new(spec: &'static ProviderSpec) -> Self {
        Self {
            spec,
            endpoint: spec.endpoint.to_string(),
            model: spec.default_model.to_string(),
        }
    }

    /// Target with `endpoint` / `model` taken from the user's config when set.
    pub fn from_config(spec: &'static ProviderSpec, config: &ProviderConfig) -> Self {
        let endpoint = config
            .api_base
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(spec.endpoint);
        let model = config
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(spec.default_model);

        Self {
            spec,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        }
    }

    pub fn spec(&self) -> &'static ProviderSpec {
        self.spec
    }

    pub fn kind(&self) -> ProviderKind {
        self.spec.kind
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_providers() {
        for id in ["anthropic", "openai"] {
            let spec = lookup(id).unwrap();
            assert_eq!(spec.name(), id);
            assert!(!spec.endpoint.is_empty());
            assert!(!spec.default_model.is_empty());
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("cohere").unwrap_err();
        assert!(matches!(err, ChatError::UnknownProvider(ref id) if id == "cohere"));
    }

    #[test]
    fn test_specs_are_provider_specific() {
        assert_ne!(ANTHROPIC.endpoint, OPENAI.endpoint);
        assert_ne!(ANTHROPIC.default_model, OPENAI.default_model);
        assert_ne!(ANTHROPIC.auth, OPENAI.auth);
    }

    #[test]
    fn test_anthropic_spec() {
        let spec = lookup("anthropic").unwrap();
        assert_eq!(spec.endpoint, "https://api.anthropic.com/v1/messages");
        assert_eq!(spec.auth, AuthScheme::KeyHeader("x-api-key"));
        assert_eq!(spec.env_key(), "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_openai_spec() {
        let spec = lookup("openai").unwrap();
        assert_eq!(spec.endpoint, "https://api.openai.com/v1/chat/completions");
        assert_eq!(spec.auth, AuthScheme::Bearer);
        assert_eq!(spec.display_name, "OpenAI");
    }

    #[test]
    fn test_registry_covers_every_kind() {
        for kind in ProviderKind::ALL {
            assert_eq!(spec_for(kind).kind, kind);
        }
        assert_eq!(PROVIDERS.len(), ProviderKind::ALL.len());
    }

    #[test]
    fn test_target_defaults() {
        let target = ProviderTarget::new(&OPENAI);
        assert_eq!(target.endpoint(), OPENAI.endpoint);
        assert_eq!(target.model(), "gpt-3.5-turbo");
        assert_eq!(target.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_target_from_config_overrides() {
        let config = ProviderConfig {
            api_base: Some("http://127.0.0.1:9000/v1/messages".to_string()),
            model: Some("claude-3-haiku-20240307".to_string()),
            ..Default::default()
        };
        let target = ProviderTarget::from_config(&ANTHROPIC, &config);
        assert_eq!(target.endpoint(), "http://127.0.0.1:9000/v1/messages");
        assert_eq!(target.model(), "claude-3-haiku-20240307");
    }

    #[test]
    fn test_target_from_config_blank_values_fall_back() {
        let config = ProviderConfig {
            api_base: Some("  ".to_string()),
            model: Some(String::new()),
            ..Default::default()
        };
        let target = ProviderTarget::from_config(&ANTHROPIC, &config);
        assert_eq!(target.endpoint(), ANTHROPIC.endpoint);
        assert_eq!(target.model(), ANTHROPIC.default_model);
    }
}
