//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream API token.
pub const ENV_API_TOKEN: &str = "PIPEDRIVE_API_TOKEN";
/// Environment variable holding the company subdomain.
pub const ENV_COMPANY_DOMAIN: &str = "PIPEDRIVE_COMPANY_DOMAIN";
/// Environment variable overriding the upstream base URL.
pub const ENV_BASE_URL: &str = "PIPEDRIVE_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, then apply environment
/// overrides. The result is not validated yet.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overlay values from the environment. Empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(token) = lookup(ENV_API_TOKEN) {
        config.upstream.api_token = token;
    }
    if let Some(domain) = lookup(ENV_COMPANY_DOMAIN) {
        config.upstream.company_domain = domain;
    }
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.upstream.base_url = Some(base_url);
    }
}

/// Run semantic validation, folding all problems into one error.
pub fn ensure_valid(config: ProxyConfig) -> Result<ProxyConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
