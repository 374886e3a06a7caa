//! Core types, error taxonomy, credentials, and configuration for duochat.

pub mod config;
pub mod credentials;
pub mod error;
pub mod types;
pub mod utils;

pub use credentials::Credentials;
pub use error::ChatError;
pub use types::{Conversation, Message, ProviderKind, Role};
