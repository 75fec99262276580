//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the deals proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Upstream CRM API settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Compatibility switches for older clients.
    pub compat: CompatConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Upstream API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API token appended to every outbound URL as `api_token`.
    pub api_token: String,

    /// Company subdomain, e.g. `acme` for `acme.pipedrive.com`.
    pub company_domain: String,

    /// Explicit API base URL. Overrides the URL derived from `company_domain`.
    pub base_url: Option<String>,

    /// End-to-end timeout for one upstream call, in seconds.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Base URL all deal endpoints hang off, always ending in `/`.
    pub fn resolved_base_url(&self) -> String {
        let base = match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.pipedrive.com/api/v1", self.company_domain),
        };
        if base.ends_with('/') {
            base
        } else {
            format!("{base}/")
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            company_domain: String::new(),
            base_url: None,
            timeout_secs: 10,
        }
    }
}

// Keeps the token out of startup logs and panic messages.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.api_token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("UpstreamConfig")
            .field("api_token", &token)
            .field("company_domain", &self.company_domain)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Path the scrape endpoint is mounted on.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}

/// Compatibility settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Accept `PUT /deals` with the deal id embedded in the JSON body.
    /// Deprecated in favour of `PUT /deals/{id}`.
    pub body_embedded_update: bool,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            body_embedded_update: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_domain() {
        let upstream = UpstreamConfig {
            company_domain: "acme".into(),
            ..Default::default()
        };
        assert_eq!(upstream.resolved_base_url(), "https://acme.pipedrive.com/api/v1/");
    }

    #[test]
    fn test_base_url_override_gets_trailing_slash() {
        let upstream = UpstreamConfig {
            company_domain: "ignored".into(),
            base_url: Some("http://127.0.0.1:9000/api/v1".into()),
            ..Default::default()
        };
        assert_eq!(upstream.resolved_base_url(), "http://127.0.0.1:9000/api/v1/");
    }

    #[test]
    fn test_debug_redacts_token() {
        let upstream = UpstreamConfig {
            api_token: "secret-token".into(),
            ..Default::default()
        };
        let rendered = format!("{:?}", upstream);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [upstream]
            api_token = "abc"
            company_domain = "acme"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert!(config.compat.body_embedded_update);
    }
}
