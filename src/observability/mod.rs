//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request:
//!     → http/middleware/logging.rs (one structured log event)
//!     → http/middleware/metrics.rs (counter + duration via RequestMetrics)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → metrics scrape endpoint (Prometheus text format)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through log events
//! - Metrics are cheap (atomic increments in the recorder)

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
pub use self::metrics::{install_exporter, PrometheusMetrics, RequestMetrics};
