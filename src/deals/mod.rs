//! Deal request translation.
//!
//! # Data Flow
//! ```text
//! handler (http/handlers.rs)
//!     → translator.rs (list / create / update / update_embedded)
//!     → identifier.rs (body-embedded id extraction, compat route only)
//!     → upstream::Forwarder
//!     → UpstreamResponse or TranslateError
//! ```
//!
//! # Design Decisions
//! - Deal payloads are opaque bytes; only the compat update decodes JSON
//! - Client errors are detected before any upstream call
//! - Non-2xx upstream responses are relayed, not treated as failures

pub mod error;
pub mod identifier;
pub mod translator;

pub use error::TranslateError;
pub use identifier::{split_identifier, DealId, IdentifierError};
pub use translator::DealsTranslator;
