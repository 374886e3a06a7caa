//! Chat session: the explicit context object for one user's conversation.
//!
//! Holds the selected provider, its credentials, the conversation, and the
//! transport. Every turn goes through [`ChatSession::submit`].

use std::sync::Arc;

use tracing::{debug, error, info};

use duochat_core::config::schema::DEFAULT_MAX_TOKENS;
use duochat_core::{ChatError, Conversation, Credentials, Message, ProviderKind};

use crate::extract::extract;
use crate::registry::ProviderTarget;
use crate::request::build;
use crate::transport::{RequestResult, Transport};

pub struct ChatSession {
    target: ProviderTarget,
    credentials: Option<Credentials>,
    conversation: Conversation,
    transport: Arc<dyn Transport>,
    max_tokens: u32,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("target", &self.target)
            .field("credentials", &self.credentials.as_ref().map(Credentials::masked))
            .field("messages", &self.conversation.len())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ChatSession {
    pub fn new(
        target: ProviderTarget,
        credentials: Option<Credentials>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            target,
            credentials,
            conversation: Conversation::new(),
            transport,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn target(&self) -> &ProviderTarget {
        &self.target
    }

    pub fn provider(&self) -> ProviderKind {
        self.target.kind()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Whether a usable key for the current provider is set.
    pub fn has_credentials(&self) -> bool {
        self.usable_credentials().is_some()
    }

    /// Store a manually entered key for the current provider.
    ///
    /// Empty or placeholder input is rejected with `MissingApiKey` and leaves
    /// the previous key in place.
    pub fn set_api_key(&mut self, raw: &str) -> Result<(), ChatError> {
        let kind = self.provider();
        let creds = Credentials::from_raw(kind, raw).ok_or(ChatError::MissingApiKey(kind))?;
        debug!(provider = %kind, key = %creds.masked(), "API key set");
        self.credentials = Some(creds);
        Ok(())
    }

    /// Switch to another provider. The conversation is kept.
    pub fn switch_provider(&mut self, target: ProviderTarget, credentials: Option<Credentials>) {
        info!(from = %self.provider(), to = %target.kind(), "switching provider");
        self.target = target;
        self.credentials = credentials;
    }

    /// Discard the whole conversation.
    pub fn clear(&mut self) {
        debug!(messages = self.conversation.len(), "clearing conversation");
        self.conversation.clear();
    }

    /// Run one turn: send `text` to the provider and record both sides.
    ///
    /// Fails before touching the conversation or the network when no usable
    /// key is set or the request cannot be built. Otherwise exactly one user
    /// and one assistant message are appended, and the assistant message is
    /// returned; transport and format problems become its content.
    pub async fn submit(&mut self, text: &str) -> Result<Message, ChatError> {
        let creds = self
            .usable_credentials()
            .ok_or(ChatError::MissingApiKey(self.provider()))?;

        let request = build(&self.target, creds.expose(), text, self.max_tokens)?;

        debug!(
            provider = self.target.spec().display_name,
            model = self.target.model(),
            url = %request.url,
            key = %creds.masked(),
            chars = text.chars().count(),
            "sending chat request"
        );

        self.conversation.append(Message::user(text));

        let reply = match self.transport.send(&request).await {
            RequestResult::Success(body) => extract(self.provider(), &body),
            RequestResult::Failure(description) => {
                error!(provider = %self.provider(), error = %description, "provider call failed");
                format!("Error: {description}")
            }
        };

        let message = Message::assistant(reply);
        self.conversation.append(message.clone());
        Ok(message)
    }

    fn usable_credentials(&self) -> Option<&Credentials> {
        self.credentials
            .as_ref()
            .filter(|c| !c.is_empty() && c.provider() == self.provider())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
