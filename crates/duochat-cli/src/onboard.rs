//! `duochat onboard`: write a default config file.
//!
//! The file never carries API keys; they come from the environment or are
//! typed into the REPL.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use duochat_core::config::{get_config_path, save_config, Config};
use duochat_providers::PROVIDERS;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "duochat setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if write_default_config(&config_path)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!("  {}", "API keys are read from the environment:".bold());
    for spec in PROVIDERS {
        println!("    export {}=...", spec.env_key());
    }

    println!();
    println!(
        "{}",
        "  Setup complete! Run `duochat chat` to start chatting.".green()
    );
    println!();

    Ok(())
}

/// Write a default config at `path` unless one exists. Returns `true` if written.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_new_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert!(write_default_config(&path).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"maxTokens\": 1000"));
        assert!(!content.contains("apiKey"));
    }

    #[test]
    fn keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{\"chat\":{\"provider\":\"openai\"}}").unwrap();

        assert!(!write_default_config(&path).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"chat\":{\"provider\":\"openai\"}}");
    }
}
