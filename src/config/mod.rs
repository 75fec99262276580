//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (ProxyConfig::default)
//!     → loader.rs (optional TOML file, then PIPEDRIVE_* env overrides)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ProxyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults except the upstream credentials
//! - Missing credentials are fatal at startup instead of producing
//!   malformed upstream URLs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ensure_valid, load_config, ConfigError};
pub use schema::{
    CompatConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
