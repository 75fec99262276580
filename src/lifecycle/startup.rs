//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Config first, then collaborators, listener last

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ListenerConfig};
use crate::upstream::TransportError;

/// Errors that stop the proxy from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] TransportError),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind the listening socket.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Listener bound");
    }
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let config = ListenerConfig {
            bind_address: "127.0.0.1:0".into(),
            ..Default::default()
        };
        let listener = bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_names_address() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();
        let config = ListenerConfig {
            bind_address: address.clone(),
            ..Default::default()
        };

        let err = bind(&config).await.unwrap_err();
        assert!(err.to_string().contains(&address));
    }

    #[test]
    fn test_config_error_keeps_its_message() {
        use crate::config::ValidationError;

        let err: StartupError =
            ConfigError::Validation(vec![ValidationError::MissingApiToken]).into();
        assert!(matches!(err, StartupError::Config(_)));
        assert!(err.to_string().contains("PIPEDRIVE_API_TOKEN"));
    }
}
