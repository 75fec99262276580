//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the deal routes
//! - Wire up middleware (request ID, logging, metrics, body limit)
//! - Mount the metrics scrape endpoint
//! - Bind server to listener and shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::ProxyConfig;
use crate::deals::DealsTranslator;
use crate::http::handlers;
use crate::http::middleware::{log_request, track_metrics};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::shutdown::wait_for;
use crate::lifecycle::StartupError;
use crate::observability::{PrometheusMetrics, RequestMetrics};
use crate::upstream::{DealsEndpoint, Forwarder, HttpForwarder};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<DealsTranslator>,
}

/// HTTP server for the deals proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server with the production collaborators: a `reqwest`
    /// forwarder and the `metrics` facade.
    ///
    /// `exporter` is mounted on the metrics path when metrics are enabled.
    pub fn new(
        config: ProxyConfig,
        exporter: Option<PrometheusHandle>,
    ) -> Result<Self, StartupError> {
        let forwarder = HttpForwarder::new(config.upstream.timeout())?;
        Self::with_collaborators(
            config,
            Arc::new(forwarder),
            Arc::new(PrometheusMetrics),
            exporter,
        )
    }

    /// Create a server with explicit collaborators.
    pub fn with_collaborators(
        config: ProxyConfig,
        forwarder: Arc<dyn Forwarder>,
        metrics: Arc<dyn RequestMetrics>,
        exporter: Option<PrometheusHandle>,
    ) -> Result<Self, StartupError> {
        let endpoint = DealsEndpoint::from_config(&config.upstream)?;
        let state = AppState {
            translator: Arc::new(DealsTranslator::new(endpoint, forwarder)),
        };

        let router = build_router(&config, state, metrics, exporter);
        Ok(Self { router })
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight
    /// requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layer order, outermost first: request ID, logging, metrics, body limit.
pub fn build_router(
    config: &ProxyConfig,
    state: AppState,
    metrics: Arc<dyn RequestMetrics>,
    exporter: Option<PrometheusHandle>,
) -> Router {
    let mut collection = get(handlers::list_deals).post(handlers::create_deal);
    if config.compat.body_embedded_update {
        collection = collection.put(handlers::update_deal_embedded);
    }

    let mut router = Router::new()
        .route("/deals", collection)
        .route("/deals/{id}", put(handlers::update_deal))
        .with_state(state);

    if let Some(handle) = exporter.filter(|_| config.observability.metrics_enabled) {
        router = router.route(
            &config.observability.metrics_path,
            get(move || std::future::ready(render_metrics(&handle))),
        );
    }

    router
        .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(middleware::from_fn(log_request))
                .layer(middleware::from_fn_with_state(metrics, track_metrics)),
        )
}

fn render_metrics(handle: &PrometheusHandle) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}
