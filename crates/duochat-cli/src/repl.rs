//! Interactive REPL.
//!
//! Uses `rustyline` for readline-style editing. Input history stays in
//! memory; nothing typed here is written to disk.

use std::collections::HashMap;

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use duochat_core::config::Config;
use duochat_core::{ChatError, Credentials, ProviderKind};
use duochat_providers::{lookup, ChatSession, ProviderTarget};

use crate::{helpers, key_input};

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// A slash command typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Provider(Option<String>),
    Key,
    Model,
    History,
    Clear,
    Help,
    Unknown(String),
}

/// One line read at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Empty,
    Exit,
    Command(ReplCommand),
    /// Chat text, exactly as typed.
    Chat(&'a str),
}

/// Run the interactive REPL loop.
pub async fn run(mut session: ChatSession, config: Config) -> Result<()> {
    helpers::print_banner(session.target());

    let mut editor = create_editor()?;
    let mut manual_keys: HashMap<ProviderKind, Credentials> = HashMap::new();

    if !session.has_credentials() {
        prompt_for_key(&mut session, &mut manual_keys);
    }

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let command = match classify_input(&input) {
            ReplInput::Empty => continue,
            ReplInput::Exit => {
                println!("\nGoodbye! 👋");
                break;
            }
            ReplInput::Command(command) => command,
            ReplInput::Chat(text) => {
                let _ = editor.add_history_entry(text);
                send_turn(text, &mut session, &mut manual_keys).await;
                continue;
            }
        };

        match command {
            ReplCommand::Provider(Some(name)) => {
                switch_provider(&name, &mut session, &config, &manual_keys);
                if !session.has_credentials() {
                    prompt_for_key(&mut session, &mut manual_keys);
                }
            }
            ReplCommand::Provider(None) => {
                println!("  usage: /provider <anthropic|openai>");
                helpers::print_target(session.target());
            }
            ReplCommand::Key => prompt_for_key(&mut session, &mut manual_keys),
            ReplCommand::Model => helpers::print_target(session.target()),
            ReplCommand::History => helpers::print_history(session.conversation()),
            ReplCommand::Clear => {
                session.clear();
                println!("  {}", "conversation cleared".dimmed());
            }
            ReplCommand::Help => helpers::print_help(),
            ReplCommand::Unknown(cmd) => {
                helpers::print_error(format!("unknown command {cmd} (try /help)"));
            }
        }
    }

    Ok(())
}

/// Send one chat message and print the reply or error.
async fn send_turn(
    text: &str,
    session: &mut ChatSession,
    manual_keys: &mut HashMap<ProviderKind, Credentials>,
) {
    if !session.has_credentials() {
        helpers::print_error(ChatError::MissingApiKey(session.provider()));
        prompt_for_key(session, manual_keys);
        if !session.has_credentials() {
            return;
        }
    }

    debug!(provider = %session.provider(), chars = text.len(), "processing input");
    helpers::print_thinking();
    let result = session.submit(text).await;
    helpers::clear_thinking();

    match result {
        Ok(reply) => helpers::print_response(&reply),
        Err(e) => helpers::print_error(e),
    }
}

/// Ask for an API key for the current provider and store it in the session.
///
/// The key is read with masked echo and never added to input history.
pub fn prompt_for_key(
    session: &mut ChatSession,
    manual_keys: &mut HashMap<ProviderKind, Credentials>,
) {
    let spec = session.target().spec();
    println!(
        "  {} no usable API key for {} (set {} or enter it now; leave empty to skip)",
        "!".yellow().bold(),
        spec.display_name,
        spec.env_key()
    );

    let raw = match key_input::read_masked("API key: ") {
        Some(line) => line,
        None => return,
    };
    if raw.trim().is_empty() {
        return;
    }

    match session.set_api_key(&raw) {
        Ok(()) => {
            if let Some(creds) = session.credentials() {
                manual_keys.insert(session.provider(), creds.clone());
            }
            println!("  {} key set for {}", "✓".green(), spec.display_name);
        }
        Err(e) => helpers::print_error(e),
    }
}

/// Select another provider, keeping the conversation.
///
/// A key entered manually earlier in the session wins over the configured one.
fn switch_provider(
    name: &str,
    session: &mut ChatSession,
    config: &Config,
    manual_keys: &HashMap<ProviderKind, Credentials>,
) {
    let spec = match lookup(name) {
        Ok(spec) => spec,
        Err(e) => {
            helpers::print_error(e);
            return;
        }
    };

    let target = ProviderTarget::from_config(spec, config.providers.get(spec.kind));
    let credentials = resolve_credentials(spec.kind, config, manual_keys);

    session.switch_provider(target, credentials);
    helpers::print_target(session.target());
}

/// Credentials for `kind`: a key entered earlier in this session, else the
/// configured one.
fn resolve_credentials(
    kind: ProviderKind,
    config: &Config,
    manual_keys: &HashMap<ProviderKind, Credentials>,
) -> Option<Credentials> {
    manual_keys
        .get(&kind)
        .cloned()
        .or_else(|| config.providers.credentials(kind))
}

/// Create a rustyline editor with in-memory history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;
    Ok(editor)
}

/// Sort a prompt line into empty input, an exit word, a slash command or
/// chat text. Only the checks look at the trimmed line.
fn classify_input(input: &str) -> ReplInput<'_> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        ReplInput::Empty
    } else if is_exit_command(trimmed) {
        ReplInput::Exit
    } else if let Some(command) = parse_command(trimmed) {
        ReplInput::Command(command)
    } else {
        ReplInput::Chat(input)
    }
}

/// Parse a `/command [arg]` line. Returns `None` for ordinary chat input.
fn parse_command(input: &str) -> Option<ReplCommand> {
    let rest = input.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::to_string);

    let command = match name.as_str() {
        "provider" => ReplCommand::Provider(arg),
        "key" => ReplCommand::Key,
        "model" => ReplCommand::Model,
        "history" => ReplCommand::History,
        "clear" => ReplCommand::Clear,
        "help" | "?" => ReplCommand::Help,
        _ => ReplCommand::Unknown(format!("/{name}")),
    };
    Some(command)
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
