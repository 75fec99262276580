//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics before the config is
//! accepted. All errors are collected, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.api_token is required (set PIPEDRIVE_API_TOKEN)")]
    MissingApiToken,

    #[error("upstream.company_domain is required (set PIPEDRIVE_COMPANY_DOMAIN)")]
    MissingCompanyDomain,

    #[error("upstream.company_domain '{0}' is not a valid subdomain")]
    InvalidCompanyDomain(String),

    #[error("upstream.base_url '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_path '{0}' must start with '/' and not shadow /deals")]
    InvalidMetricsPath(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let upstream = &config.upstream;

    if upstream.api_token.trim().is_empty() {
        errors.push(ValidationError::MissingApiToken);
    }

    match &upstream.base_url {
        Some(base) => {
            let valid = Url::parse(base)
                .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
                .unwrap_or(false);
            if !valid {
                errors.push(ValidationError::InvalidBaseUrl(base.clone()));
            }
        }
        None if upstream.company_domain.is_empty() => {
            errors.push(ValidationError::MissingCompanyDomain);
        }
        None if !is_dns_label(&upstream.company_domain) => {
            errors.push(ValidationError::InvalidCompanyDomain(
                upstream.company_domain.clone(),
            ));
        }
        None => {}
    }

    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let metrics_path = &config.observability.metrics_path;
    if config.observability.metrics_enabled
        && (!metrics_path.starts_with('/') || metrics_path.starts_with("/deals"))
    {
        errors.push(ValidationError::InvalidMetricsPath(metrics_path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_dns_label(label: &str) -> bool {
    label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
