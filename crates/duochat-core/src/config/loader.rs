//! Config loader: reads `~/.duochat/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.duochat/config.json`
//! 3. Vendor key variables `ANTHROPIC_API_KEY` / `OPENAI_API_KEY`
//! 4. Environment variables `DUOCHAT_<SECTION>__<FIELD>` (override everything)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::ChatError;
use crate::types::ProviderKind;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |name| std::env::var(name).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(mut config) => {
            if config.chat.timeout_secs == 0 {
                warn!("Ignoring chat.timeoutSecs = 0 in {}, using default", path.display());
                config.chat.timeout_secs = DEFAULT_TIMEOUT_SECS;
            }
            config
        }
        Err(e) => {
            warn!("Failed to parse config JSON {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
///
/// API keys are skipped by the schema and never reach the file.
pub fn save_config(config: &Config, path: Option<&Path>) -> Result<(), ChatError> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` resolves a variable name to its value; production code passes
/// `std::env::var`.
///
/// Supported overrides:
/// - `ANTHROPIC_API_KEY`, `OPENAI_API_KEY` → `providers.<name>.api_key`
/// - `DUOCHAT_CHAT__PROVIDER` → `chat.provider`
/// - `DUOCHAT_CHAT__MAX_TOKENS` → `chat.max_tokens`
/// - `DUOCHAT_CHAT__TIMEOUT_SECS` → `chat.timeout_secs`
/// - `DUOCHAT_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `DUOCHAT_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `DUOCHAT_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    for kind in ProviderKind::ALL {
        if let Some(val) = lookup(kind.env_key()) {
            config.providers.get_mut(kind).api_key = val;
        }
    }

    if let Some(val) = lookup("DUOCHAT_CHAT__PROVIDER") {
        match val.parse::<ProviderKind>() {
            Ok(kind) => config.chat.provider = kind,
            Err(e) => warn!("Ignoring DUOCHAT_CHAT__PROVIDER: {}", e),
        }
    }
    if let Some(val) = lookup("DUOCHAT_CHAT__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.chat.max_tokens = n;
        }
    }
    if let Some(val) = lookup("DUOCHAT_CHAT__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(n) if n > 0 => config.chat.timeout_secs = n,
            _ => warn!("Ignoring DUOCHAT_CHAT__TIMEOUT_SECS={val}: expected a positive number of seconds"),
        }
    }

    for kind in ProviderKind::ALL {
        apply_provider_env(config.providers.get_mut(kind), kind, &lookup);
    }

    config
}

/// Apply `DUOCHAT_PROVIDERS__<NAME>__*` overrides for a single provider.
fn apply_provider_env<F>(provider: &mut ProviderConfig, kind: ProviderKind, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let name = kind.as_str().to_uppercase();
    if let Some(val) = lookup(&format!("DUOCHAT_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = lookup(&format!("DUOCHAT_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Some(val) = lookup(&format!("DUOCHAT_PROVIDERS__{name}__MODEL")) {
        provider.model = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
