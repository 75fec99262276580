//! Response handling.
//!
//! # Responsibilities
//! - Relay the upstream status and body to the client
//! - Force `Content-Type: application/json` on relayed responses
//! - Turn local failures into JSON error bodies
//!
//! # Design Decisions
//! - The upstream body is streamed through, never buffered
//! - Upstream headers other than the content type are not relayed
//! - Local error bodies mirror the upstream envelope:
//!   `{"success": false, "error": "..."}`

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::deals::TranslateError;
use crate::upstream::UpstreamResponse;

/// An upstream response on its way back to the client.
#[derive(Debug)]
pub struct Relayed(pub UpstreamResponse);

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let upstream = self.0;
        let mut response = Response::new(upstream.body);
        *response.status_mut() = upstream.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::warn!(error = %self, "Rejected request");
        } else {
            tracing::error!(error = %self, "Upstream call failed");
        }
        error_response(self.status(), &self.to_string())
    }
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
