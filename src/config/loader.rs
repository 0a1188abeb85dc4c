//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MarketConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the block explorer API key.
pub const EXPLORER_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse, apply env overrides and validate a TOML document.
pub fn parse_config(content: &str) -> Result<MarketConfig, ConfigError> {
    let mut config: MarketConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MarketConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load from `path` when given, otherwise start from defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<MarketConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => parse_config(""),
    }
}

fn apply_env_overrides(config: &mut MarketConfig) {
    if let Ok(key) = std::env::var(EXPLORER_API_KEY_ENV_VAR) {
        if !key.is_empty() {
            config.endpoints.explorer_api_key = Some(key);
        }
    }
}
