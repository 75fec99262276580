//! Test doubles shared by unit tests.

use std::convert::Infallible;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

use crate::observability::RequestMetrics;
use crate::upstream::{Forwarder, OutboundCall, TransportError, UpstreamResponse};

enum Reply {
    Respond { status: StatusCode, body: &'static str },
    SlowBody { body: &'static str, delay: Duration },
    Timeout,
    Refused,
}

/// Forwarder that records every call and answers with a canned reply.
pub struct StubForwarder {
    calls: Mutex<Vec<OutboundCall>>,
    reply: Reply,
}

impl StubForwarder {
    /// Reply with `status` and `body`, labelled `text/plain` like a
    /// misbehaving upstream.
    pub fn ok(status: StatusCode, body: &'static str) -> Self {
        Self::with_reply(Reply::Respond { status, body })
    }

    /// Reply 200 at once, but hold the body back for `delay`.
    pub fn slow_body(body: &'static str, delay: Duration) -> Self {
        Self::with_reply(Reply::SlowBody { body, delay })
    }

    pub fn timeout() -> Self {
        Self::with_reply(Reply::Timeout)
    }

    pub fn refused() -> Self {
        Self::with_reply(Reply::Refused)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply,
        }
    }

    pub fn calls(&self) -> Vec<OutboundCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Forwarder for StubForwarder {
    async fn forward(&self, call: OutboundCall) -> Result<UpstreamResponse, TransportError> {
        self.calls.lock().unwrap().push(call);
        match self.reply {
            Reply::Respond { status, body } => Ok(UpstreamResponse {
                status,
                headers: plain_text(),
                body: Body::from(body),
            }),
            Reply::SlowBody { body, delay } => {
                let chunk = futures_util::stream::once(async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, Infallible>(Bytes::from_static(body.as_bytes()))
                });
                Ok(UpstreamResponse {
                    status: StatusCode::OK,
                    headers: plain_text(),
                    body: Body::from_stream(chunk),
                })
            }
            Reply::Timeout => Err(TransportError::Timeout(Duration::from_secs(10))),
            Reply::Refused => Err(TransportError::Connect("connection refused".into())),
        }
    }
}

fn plain_text() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers
}

/// Metrics sink that remembers every call.
#[derive(Default)]
pub struct RecordingMetrics {
    requests: Mutex<Vec<(String, String)>>,
    durations: Mutex<Vec<(String, String, Duration)>>,
}

impl RecordingMetrics {
    pub fn request_count(&self, method: &str, endpoint: &str) -> usize {
        count(&self.requests, method, endpoint)
    }

    pub fn duration_count(&self, method: &str, endpoint: &str) -> usize {
        self.durations(method, endpoint).len()
    }

    pub fn durations(&self, method: &str, endpoint: &str) -> Vec<Duration> {
        self.durations
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, e, _)| m == method && e == endpoint)
            .map(|(_, _, elapsed)| *elapsed)
            .collect()
    }
}

fn count(samples: &Mutex<Vec<(String, String)>>, method: &str, endpoint: &str) -> usize {
    samples
        .lock()
        .unwrap()
        .iter()
        .filter(|(m, e)| m == method && e == endpoint)
        .count()
}

impl RequestMetrics for RecordingMetrics {
    fn increment_requests(&self, method: &str, endpoint: &str) {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_owned(), endpoint.to_owned()));
    }

    fn observe_duration(&self, method: &str, endpoint: &str, elapsed: Duration) {
        self.durations
            .lock()
            .unwrap()
            .push((method.to_owned(), endpoint.to_owned(), elapsed));
    }
}
