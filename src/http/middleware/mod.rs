//! Observability middleware wrapped around every route.
//!
//! Both wrappers are pure observers: neither reads the body nor alters the
//! response. Logging runs outside metrics.

pub mod logging;
pub mod metrics;

pub use logging::log_request;
pub use self::metrics::track_metrics;
