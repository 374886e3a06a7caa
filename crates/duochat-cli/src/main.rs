//! duochat CLI: entry point.
//!
//! # Commands
//!
//! - `duochat chat [-m MESSAGE] [-p PROVIDER]`: single-shot or interactive REPL
//! - `duochat onboard`: write a default config file
//! - `duochat status`: show configuration and provider key status

mod helpers;
mod key_input;
mod onboard;
mod repl;
mod status;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use duochat_core::config::{load_config, Config};
use duochat_core::ChatError;
use duochat_providers::{lookup, spec_for, ChatSession, HttpTransport, ProviderTarget};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// duochat: chat with Anthropic or OpenAI models from the terminal
#[derive(Parser)]
#[command(name = "duochat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with a model (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Provider to use: anthropic or openai (defaults to the config value)
        #[arg(short, long)]
        provider: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write a default configuration file
    Onboard,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            provider,
            logs,
        } => {
            init_logging(logs);
            run_chat(message, provider).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(message: Option<String>, provider: Option<String>) -> Result<()> {
    let config = load_config(None);
    let mut session = build_session(&config, provider.as_deref())?;

    match message {
        Some(msg) => {
            info!(provider = %session.provider(), "processing single message");
            if !session.has_credentials() {
                repl::prompt_for_key(&mut session, &mut HashMap::new());
            }
            let reply = session
                .submit(&msg)
                .await
                .context("chat request was not sent")?;
            helpers::print_response(&reply);
        }
        None => {
            repl::run(session, config).await?;
        }
    }

    Ok(())
}

/// Build a `ChatSession` from the loaded configuration.
///
/// `provider` overrides `chat.provider` from the config.
pub fn build_session(config: &Config, provider: Option<&str>) -> Result<ChatSession, ChatError> {
    let spec = match provider {
        Some(name) => lookup(name)?,
        None => spec_for(config.chat.provider),
    };

    let target = ProviderTarget::from_config(spec, config.providers.get(spec.kind));
    let credentials = config.providers.credentials(spec.kind);
    let transport = HttpTransport::new(Duration::from_secs(config.chat.timeout_secs))?;

    Ok(ChatSession::new(target, credentials, Arc::new(transport))
        .with_max_tokens(config.chat.max_tokens))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("duochat=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
