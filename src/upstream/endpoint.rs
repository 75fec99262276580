//! Upstream URL construction.

use url::{ParseError, Url};

use crate::config::UpstreamConfig;
use crate::deals::DealId;

/// Builds every outbound deals URL from the base URL and the API token.
#[derive(Clone)]
pub struct DealsEndpoint {
    /// Base ending in `/`, e.g. `https://acme.pipedrive.com/api/v1/`.
    base: Url,
    api_token: String,
}

impl DealsEndpoint {
    pub fn new(base: &str, api_token: impl Into<String>) -> Result<Self, ParseError> {
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        Ok(Self {
            base,
            api_token: api_token.into(),
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ParseError> {
        Self::new(&config.resolved_base_url(), config.api_token.clone())
    }

    /// `{base}/deals?api_token=...`, followed by `passthrough`.
    ///
    /// `passthrough` is the inbound raw query string. It is appended without
    /// decoding, so key order, repeated keys and existing escapes survive.
    /// The few bytes an http(s) query may not carry unescaped (`'`, `"`,
    /// space, `<`, `>`) are percent-encoded on the way out.
    pub fn collection(&self, passthrough: Option<&str>) -> Result<Url, ParseError> {
        let mut url = self.authorized("deals")?;
        if let Some(raw) = passthrough.filter(|q| !q.is_empty()) {
            let query = format!("{}&{}", url.query().unwrap_or_default(), raw);
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    /// `{base}/deals/{id}?api_token=...`
    pub fn item(&self, id: DealId) -> Result<Url, ParseError> {
        self.authorized(&format!("deals/{id}"))
    }

    fn authorized(&self, path: &str) -> Result<Url, ParseError> {
        let mut url = self.base.join(path)?;
        url.query_pairs_mut().append_pair("api_token", &self.api_token);
        Ok(url)
    }
}
