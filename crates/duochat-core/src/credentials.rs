//! API key handling.
//!
//! Keys live in a [`SecretString`] so they never show up in `Debug` output or
//! logs. Nothing in this crate writes them to disk.

use secrecy::{ExposeSecret, SecretString};

use crate::types::ProviderKind;

/// Values commonly left in `.env` templates. Treated the same as "unset".
pub const KEY_PLACEHOLDERS: &[&str] = &[
    "your_api_key_here",
    "your-api-key-here",
    "your_anthropic_api_key_here",
    "your_openai_api_key_here",
    "sk-...",
    "changeme",
    "<api-key>",
];

/// Whether `raw` looks like a real key rather than empty text or a template
/// placeholder.
pub fn is_usable_key(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !KEY_PLACEHOLDERS.iter().any(|p| *p == lower)
}

/// A secret API key bound to the provider it was entered for.
#[derive(Clone, Debug)]
pub struct Credentials {
    provider: ProviderKind,
    api_key: SecretString,
}

impl Credentials {
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        let key: String = api_key.into();
        Self {
            provider,
            api_key: SecretString::from(key.trim().to_string()),
        }
    }

    /// Build credentials only if `raw` passes [`is_usable_key`].
    pub fn from_raw(provider: ProviderKind, raw: &str) -> Option<Self> {
        is_usable_key(raw).then(|| Self::new(provider, raw))
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Reveal the key. Call sites should be limited to header construction.
    pub fn expose(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.expose_secret().is_empty()
    }

    /// First four characters followed by an ellipsis, for status output and
    /// debug logs.
    pub fn masked(&self) -> String {
        mask_secret(self.api_key.expose_secret())
    }
}

/// Mask a secret, keeping at most its first four characters.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(empty)".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "…".to_string()
    } else {
        format!("{visible}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_not_usable() {
        assert!(!is_usable_key(""));
        assert!(!is_usable_key("   "));
        assert!(!is_usable_key("your_api_key_here"));
        assert!(!is_usable_key("YOUR_OPENAI_API_KEY_HERE"));
        assert!(!is_usable_key(" sk-... "));
        assert!(is_usable_key("sk-ant-api03-real"));
    }

    #[test]
    fn test_from_raw() {
        assert!(Credentials::from_raw(ProviderKind::Anthropic, "changeme").is_none());
        let creds = Credentials::from_raw(ProviderKind::OpenAi, " sk-live-123 ").unwrap();
        assert_eq!(creds.expose(), "sk-live-123");
        assert_eq!(creds.provider(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let creds = Credentials::new(ProviderKind::OpenAi, "sk-secret-value");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("sk-secret-value"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-ant-123456"), "sk-a…");
        assert_eq!(mask_secret("abc"), "…");
        assert_eq!(mask_secret(""), "(empty)");
    }
}
