//! Deals proxy library.
//!
//! Forwards deal list/create/update requests to the Pipedrive REST API,
//! injecting the API token and company domain, with request logging and
//! Prometheus metrics around every route.

pub mod config;
pub mod deals;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

#[cfg(test)]
mod test_support;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
