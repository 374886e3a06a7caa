//! Provider layer for duochat.
//!
//! # Architecture
//!
//! - [`registry`]: static specs for the two supported providers + lookup
//! - [`dialect`]: single dispatch point from provider kind to wire format
//!   ([`anthropic`], [`openai`])
//! - [`request::build`]: provider-specific headers and body
//! - [`transport`]: the `Transport` trait and its `reqwest` implementation
//! - [`extract`]: reply text or the fixed format-error sentinel
//! - [`session::ChatSession`]: per-session context that runs a turn

pub mod anthropic;
pub mod dialect;
pub mod extract;
pub mod openai;
pub mod registry;
pub mod request;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use extract::{extract, try_extract, FORMAT_ERROR_SENTINEL};
pub use registry::{lookup, spec_for, AuthScheme, ProviderSpec, ProviderTarget, PROVIDERS};
pub use request::{build, PreparedRequest};
pub use session::ChatSession;
pub use transport::{HttpTransport, RequestResult, Transport};
