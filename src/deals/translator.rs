//! Inbound-to-outbound request translation for deals.
//!
//! Each operation maps one inbound request shape to exactly one call through
//! the [`Forwarder`] and hands the upstream response back untouched.

use std::sync::Arc;

use axum::body::Bytes;

use crate::deals::error::TranslateError;
use crate::deals::identifier::{split_identifier, DealId};
use crate::upstream::{DealsEndpoint, Forwarder, OutboundCall, TransportError, UpstreamResponse};

pub struct DealsTranslator {
    endpoint: DealsEndpoint,
    forwarder: Arc<dyn Forwarder>,
}

impl DealsTranslator {
    pub fn new(endpoint: DealsEndpoint, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            endpoint,
            forwarder,
        }
    }

    /// `GET /deals`: the raw inbound query string rides along verbatim.
    pub async fn list(&self, query: Option<&str>) -> Result<UpstreamResponse, TranslateError> {
        let url = self.endpoint.collection(query).map_err(invalid_url)?;
        Ok(self.forwarder.forward(OutboundCall::get(url)).await?)
    }

    /// `POST /deals`: the body is forwarded byte for byte.
    pub async fn create(&self, body: Bytes) -> Result<UpstreamResponse, TranslateError> {
        let url = self.endpoint.collection(None).map_err(invalid_url)?;
        Ok(self.forwarder.forward(OutboundCall::post(url, body)).await?)
    }

    /// `PUT /deals/{id}`: the body is forwarded byte for byte.
    pub async fn update(&self, id: DealId, body: Bytes) -> Result<UpstreamResponse, TranslateError> {
        let url = self.endpoint.item(id).map_err(invalid_url)?;
        Ok(self.forwarder.forward(OutboundCall::put(url, body)).await?)
    }

    /// Deprecated `PUT /deals` with the id inside the JSON body.
    ///
    /// Fails with [`TranslateError::BadRequest`] before anything is sent
    /// upstream when the body is not an object or `id` is missing or not
    /// numeric.
    pub async fn update_embedded(&self, body: &[u8]) -> Result<UpstreamResponse, TranslateError> {
        let (id, remainder) = split_identifier(body)?;
        tracing::debug!(deal_id = %id, "Extracted deal id from body");
        self.update(id, remainder).await
    }
}

fn invalid_url(err: url::ParseError) -> TransportError {
    TransportError::InvalidRequest(err.to_string())
}
