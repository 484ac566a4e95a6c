//! Configuration resolution for ctriage-web
//!
//! Settings resolve with CLI → ENV → TOML → built-in default priority.

use ctriage_common::config::{is_valid_key, TomlConfig};
use ctriage_common::{Error, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::services::GeminiConfig;

/// Environment variables checked for the API key, highest priority first
pub const API_KEY_ENV_VARS: [&str; 2] = ["CTRIAGE_API_KEY", "GEMINI_API_KEY"];

/// Resolve the classification service API key
///
/// **Priority:** command line → `CTRIAGE_API_KEY` → `GEMINI_API_KEY` → TOML
pub fn resolve_api_key(cli_key: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    let mut candidates: Vec<(&str, String)> = Vec::new();

    if let Some(key) = cli_key {
        candidates.push(("command line", key.to_string()));
    }
    for var in API_KEY_ENV_VARS {
        if let Ok(key) = std::env::var(var) {
            candidates.push((var, key));
        }
    }
    if let Some(key) = &toml_config.api_key {
        candidates.push(("TOML", key.clone()));
    }

    let valid: Vec<&(&str, String)> = candidates
        .iter()
        .filter(|(_, key)| is_valid_key(key))
        .collect();

    // Warn if multiple sources (potential misconfiguration)
    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    match valid.first() {
        Some((source, key)) => {
            info!("API key loaded from {}", source);
            Ok(key.clone())
        }
        None => Err(Error::Config(
            "Classification API key not configured. Please configure using one of:\n\
             1. Command line: --api-key your-key-here\n\
             2. Environment: CTRIAGE_API_KEY=your-key-here (or GEMINI_API_KEY)\n\
             3. TOML config: ~/.config/ctriage/config.toml (api_key = \"your-key\")"
                .to_string(),
        )),
    }
}

/// Build the Gemini client settings from the TOML config and a resolved key
pub fn gemini_config(toml_config: &TomlConfig, api_key: String) -> GeminiConfig {
    GeminiConfig {
        api_key,
        model: toml_config.model().to_string(),
        base_url: toml_config.api_base_url().to_string(),
        timeout: Duration::from_secs(toml_config.request_timeout_secs()),
    }
}
