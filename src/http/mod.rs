//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → middleware/ (logging, metrics)
//!     → handlers.rs (extract, call translator)
//!     → response.rs (relay upstream response or JSON error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
