//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use deals_proxy::config::ensure_valid;
use deals_proxy::{HttpServer, ProxyConfig, Shutdown};

#[allow(dead_code)]
pub const TOKEN: &str = "test-token";

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// In-process stand-in for the CRM API.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock upstream that always answers `status` with `body`.
#[allow(dead_code)]
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_programmable_upstream(move |_| async move { (status, body.to_string()) }).await
}

/// Start a programmable mock upstream with async support.
///
/// Responses are labelled `text/plain` so tests can see the proxy force JSON.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> MockUpstream
where
    F: Fn(Recorded) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let f = Arc::new(f);
    let log = requests.clone();
    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
            let f = f.clone();
            let log = log.clone();
            async move {
                let recorded = Recorded {
                    method,
                    path: uri.path().to_string(),
                    query: uri.query().map(str::to_string),
                    content_type: headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body,
                };
                log.lock().unwrap().push(recorded.clone());

                let (status, body) = f(recorded).await;
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "text/plain")],
                    body,
                )
            }
        },
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Valid proxy config pointing at `base_url`.
pub fn proxy_config(base_url: String) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.api_token = TOKEN.into();
    config.upstream.base_url = Some(base_url);
    config
}

/// Start the proxy on an ephemeral port.
#[allow(dead_code)]
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    start_proxy_with_exporter(config, None).await
}

pub async fn start_proxy_with_exporter(
    config: ProxyConfig,
    exporter: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> (SocketAddr, Shutdown) {
    let config = ensure_valid(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, exporter).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
