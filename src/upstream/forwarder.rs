//! Outbound HTTP calls to the upstream API.
//!
//! # Responsibilities
//! - Build one outbound request per inbound request
//! - Force `Content-Type: application/json`
//! - Enforce a fixed end-to-end timeout
//! - Hand back the raw upstream response for relaying
//!
//! # Design Decisions
//! - Single attempt; callers decide what a failure means
//! - Timeout errors are distinct from other transport errors
//! - The response body is streamed, never buffered here

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use thiserror::Error;
use url::Url;

/// Methods the proxy ever sends upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMethod {
    Get,
    Post,
    Put,
}

impl UpstreamMethod {
    pub fn as_http(self) -> Method {
        match self {
            UpstreamMethod::Get => Method::GET,
            UpstreamMethod::Post => Method::POST,
            UpstreamMethod::Put => Method::PUT,
        }
    }
}

/// Description of one outbound call.
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub method: UpstreamMethod,
    pub url: Url,
    /// Present for POST and PUT, absent for GET.
    pub body: Option<Bytes>,
}

impl OutboundCall {
    pub fn get(url: Url) -> Self {
        Self {
            method: UpstreamMethod::Get,
            url,
            body: None,
        }
    }

    pub fn post(url: Url, body: Bytes) -> Self {
        Self {
            method: UpstreamMethod::Post,
            url,
            body: Some(body),
        }
    }

    pub fn put(url: Url, body: Bytes) -> Self {
        Self {
            method: UpstreamMethod::Put,
            url,
            body: Some(body),
        }
    }
}

/// Raw upstream response, relayed by the caller.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Failure to complete an outbound call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be constructed.
    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),

    /// DNS resolution or TCP/TLS connect failed.
    #[error("upstream connection failed: {0}")]
    Connect(String),

    /// The end-to-end deadline elapsed.
    #[error("upstream request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("upstream request failed: {0}")]
    Request(String),
}

/// The single chokepoint for outbound calls.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, call: OutboundCall) -> Result<UpstreamResponse, TransportError>;
}

/// `Forwarder` backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpForwarder {
    /// Create a forwarder with the given end-to-end timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, call: OutboundCall) -> Result<UpstreamResponse, TransportError> {
        // Only the path is logged; the query carries the API token.
        tracing::debug!(
            method = ?call.method,
            path = %call.url.path(),
            "Forwarding upstream"
        );

        let mut request = self
            .client
            .request(call.method.as_http(), call.url)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = call.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        Ok(UpstreamResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}
