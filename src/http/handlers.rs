//! Route handlers for `/deals`.
//!
//! Thin adapters between axum extractors and [`DealsTranslator`].
//!
//! [`DealsTranslator`]: crate::deals::DealsTranslator

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Uri;

use crate::deals::{DealId, IdentifierError, TranslateError};
use crate::http::response::Relayed;
use crate::http::server::AppState;

/// `GET /deals`
pub async fn list_deals(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Relayed, TranslateError> {
    state.translator.list(uri.query()).await.map(Relayed)
}

/// `POST /deals`
pub async fn create_deal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Relayed, TranslateError> {
    state.translator.create(body).await.map(Relayed)
}

/// `PUT /deals/{id}`
pub async fn update_deal(
    State(state): State<AppState>,
    id: Result<Path<DealId>, PathRejection>,
    body: Bytes,
) -> Result<Relayed, TranslateError> {
    let Path(id) = id.map_err(|rejection| IdentifierError::InvalidPath(rejection.body_text()))?;
    state.translator.update(id, body).await.map(Relayed)
}

/// `PUT /deals` with the id in the body. Deprecated.
pub async fn update_deal_embedded(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Relayed, TranslateError> {
    state.translator.update_embedded(&body).await.map(Relayed)
}
