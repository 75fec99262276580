//! Request identification.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) when the caller did not send one
//! - Expose the ID to log events and echo it on the response
//!
//! # Design Decisions
//! - Request ID added as early as possible (outermost layer)
//! - A caller-supplied `x-request-id` is kept as is

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID header, if set.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(&X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
    }
}
