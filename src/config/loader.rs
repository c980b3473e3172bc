//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the comma-separated upstream pool.
pub const ENV_POOL: &str = "SEARX_POOL";
/// Environment variable holding the allowed CORS origin.
pub const ENV_ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";
/// Environment variable overriding the listener address.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

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

/// Load and validate configuration.
///
/// Defaults, then the optional TOML file, then the process environment.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto a configuration.
///
/// `lookup` abstracts the environment so tests need not mutate process state.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(pool) = lookup(ENV_POOL) {
        config.upstreams.pool = Some(pool);
    }
    if let Some(origin) = lookup(ENV_ALLOWED_ORIGIN).filter(|o| !o.is_empty()) {
        config.cors.allowed_origin = origin;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS).filter(|a| !a.trim().is_empty()) {
        config.listener.bind_address = addr.trim().to_string();
    }
}
