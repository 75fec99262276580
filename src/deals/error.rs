//! Translator error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::deals::identifier::IdentifierError;
use crate::upstream::TransportError;

/// Why a translator could not relay an upstream response.
///
/// Upstream application errors (non-2xx) are not represented here: they are
/// relayed like any other upstream response.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The inbound request is unusable. Nothing was sent upstream.
    #[error(transparent)]
    BadRequest(#[from] IdentifierError),

    /// The outbound call could not be made or completed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl TranslateError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, TranslateError::BadRequest(_))
    }

    /// Status reported to the original caller.
    pub fn status(&self) -> StatusCode {
        match self {
            TranslateError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TranslateError::Transport(TransportError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            TranslateError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
