//! Request logging middleware.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};

use crate::http::request::RequestIdExt;

/// Emit one structured event per inbound request, then hand it on.
///
/// The body is never read.
pub async fn log_request(request: Request, next: Next) -> Response {
    let caller = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(
        method = %request.method(),
        target = %request.uri(),
        caller = %caller,
        request_id = request.request_id().unwrap_or("-"),
        "Inbound request"
    );

    next.run(request).await
}
