//! Request metrics middleware.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use http_body::{Body as HttpBody, Frame, SizeHint};

use crate::observability::RequestMetrics;

/// Endpoint label for requests that matched no route.
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Count the request on entry and record its duration once the response
/// body has been relayed.
///
/// The endpoint label is the route template (`/deals/{id}`), not the raw
/// path, so label cardinality stays bounded.
pub async fn track_metrics(
    State(metrics): State<Arc<dyn RequestMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_owned();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_owned());

    metrics.increment_requests(&method, &endpoint);
    let timer = RequestTimer {
        metrics,
        method,
        endpoint,
        started: Instant::now(),
    };

    // Dropped here if the handler is cancelled; otherwise the body owns it.
    let response = next.run(request).await;
    response.map(|body| {
        Body::new(TimedBody {
            inner: body,
            timer: Some(timer),
        })
    })
}

/// Response body that stops the timer at end of stream, on a body error,
/// or when the body is dropped unfinished.
struct TimedBody {
    inner: Body,
    timer: Option<RequestTimer>,
}

impl HttpBody for TimedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = &mut *self;
        let polled = Pin::new(&mut this.inner).poll_frame(cx);
        if matches!(polled, Poll::Ready(None) | Poll::Ready(Some(Err(_)))) {
            this.timer.take();
        }
        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

/// Observes the elapsed time when dropped, so error returns and cancelled
/// requests are timed too.
struct RequestTimer {
    metrics: Arc<dyn RequestMetrics>,
    method: String,
    endpoint: String,
    started: Instant,
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        self.metrics
            .observe_duration(&self.method, &self.endpoint, self.started.elapsed());
    }
}
