//! `duochat status`: show configuration and provider status.
//!
//! Keys are only ever shown masked.

use anyhow::Result;
use colored::Colorize;

use duochat_core::config::{get_config_path, load_config, Config};
use duochat_providers::{ProviderTarget, PROVIDERS};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "duochat status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
    println!("  {:<18} {}", "Provider:".bold(), config.chat.provider);
    println!(
        "  {:<18} {} | timeout: {}s",
        "Parameters:".bold(),
        format!("max_tokens: {}", config.chat.max_tokens).dimmed(),
        config.chat.timeout_secs.to_string().dimmed(),
    );

    println!();
    println!("  {}", "Providers:".bold());
    for line in provider_lines(&config) {
        println!("    {line}");
    }
    println!();

    Ok(())
}

/// One plain-text status line per registered provider.
fn provider_lines(config: &Config) -> Vec<String> {
    PROVIDERS
        .iter()
        .map(|&spec| {
            let target = ProviderTarget::from_config(spec, config.providers.get(spec.kind));
            let key = match config.providers.credentials(spec.kind) {
                Some(creds) => format!("key {}", creds.masked()),
                None => format!("not configured (set {})", spec.env_key()),
            };
            format!(
                "{:<12} {:<28} {} {}",
                spec.display_name,
                target.model(),
                target.endpoint(),
                key
            )
        })
        .collect()
}
