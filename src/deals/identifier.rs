//! Deal identifiers.
//!
//! The canonical update route carries the id as a path segment. The
//! deprecated `PUT /deals` route carries it in the JSON body under `id`;
//! [`split_identifier`] pulls it out and re-encodes the rest of the object.

use std::fmt;

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body field holding the deal id in the body-embedded update form.
pub const ID_FIELD: &str = "id";

/// Numeric upstream deal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DealId(u64);

impl DealId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an identifier could not be obtained. Always the caller's fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("invalid deal id in path: {0}")]
    InvalidPath(String),

    #[error("request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing 'id' field in request body")]
    Missing,

    #[error("'id' must be a non-negative number, got {0}")]
    NotNumeric(String),
}

/// Decode `body` as a JSON object, remove its `id` field and return the id
/// together with the re-encoded remainder.
///
/// Field order of the remainder is preserved. Fractional ids truncate toward
/// zero (`42.9` becomes `42`); they are not rounded.
pub fn split_identifier(body: &[u8]) -> Result<(DealId, Bytes), IdentifierError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| IdentifierError::InvalidJson(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(IdentifierError::NotAnObject);
    };

    let raw = object.shift_remove(ID_FIELD).ok_or(IdentifierError::Missing)?;
    let id = to_deal_id(&raw)?;

    let remainder = serde_json::to_vec(&Value::Object(object))
        .map_err(|e| IdentifierError::InvalidJson(e.to_string()))?;
    Ok((id, Bytes::from(remainder)))
}

fn to_deal_id(value: &Value) -> Result<DealId, IdentifierError> {
    let Value::Number(number) = value else {
        return Err(IdentifierError::NotNumeric(value.to_string()));
    };
    if let Some(id) = number.as_u64() {
        return Ok(DealId(id));
    }
    match number.as_f64() {
        // (-1, 0) truncates to zero.
        Some(f) if f.is_finite() && f > -1.0 && f < u64::MAX as f64 => Ok(DealId(f.trunc() as u64)),
        _ => Err(IdentifierError::NotNumeric(number.to_string())),
    }
}
