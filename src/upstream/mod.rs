//! Upstream (CRM API) side of the proxy.
//!
//! # Data Flow
//! ```text
//! translator
//!     → endpoint.rs (base URL + api_token + path/query)
//!     → forwarder.rs (one HTTP call, fixed timeout)
//!     → UpstreamResponse (status, headers, streaming body)
//! ```

pub mod endpoint;
pub mod forwarder;

pub use endpoint::DealsEndpoint;
pub use forwarder::{
    Forwarder, HttpForwarder, OutboundCall, TransportError, UpstreamMethod, UpstreamResponse,
};
