//! Shared CLI helpers: message printing, banner, thinking indicator.

use colored::Colorize;

use duochat_core::{Conversation, Message, Role};
use duochat_providers::ProviderTarget;

/// Print one message with a role label.
pub fn print_message(message: &Message) {
    println!();
    match message.role() {
        Role::User => println!("{}", "You".green().bold()),
        Role::Assistant => println!("{}", "Assistant".cyan().bold()),
    }
    if message.content().is_empty() {
        println!("{}", "(empty)".dimmed());
    } else {
        println!("{}", message.content());
    }
    println!();
}

/// Print the assistant's reply for the current turn.
pub fn print_response(message: &Message) {
    print_message(message);
}

/// Print the full conversation in order.
pub fn print_history(conversation: &Conversation) {
    if conversation.is_empty() {
        println!("{}", "(no messages yet)".dimmed());
        return;
    }
    for message in conversation.all() {
        print_message(message);
    }
}

/// Print an error without leaving the session.
pub fn print_error(err: impl std::fmt::Display) {
    eprintln!("\n{} {err}\n", "✗".red().bold());
}

/// Print the currently selected provider and model.
pub fn print_target(target: &ProviderTarget) {
    println!(
        "  {} {} {}",
        target.spec().display_name.bold(),
        "·".dimmed(),
        target.model().dimmed()
    );
}

/// Print the banner shown at REPL start.
pub fn print_banner(target: &ProviderTarget) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "duochat".cyan().bold(), version.dimmed());
    print_target(target);
    println!(
        "{}",
        "Type a message, /help for commands, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print the REPL command list.
pub fn print_help() {
    println!();
    println!("  {:<22} {}", "/provider <name>".bold(), "switch to anthropic or openai");
    println!("  {:<22} {}", "/key".bold(), "enter an API key for the current provider");
    println!("  {:<22} {}", "/model".bold(), "show the current provider and model");
    println!("  {:<22} {}", "/history".bold(), "show the conversation so far");
    println!("  {:<22} {}", "/clear".bold(), "discard the conversation");
    println!("  {:<22} {}", "exit".bold(), "leave duochat");
    println!();
}

/// Print a "thinking" placeholder while a request is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ processing...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}
