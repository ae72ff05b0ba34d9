//! Partner API response envelopes
//!
//! List endpoints answer with a bare JSON array. Everything else answers with
//! an object carrying `success`, an optional `message` and the payload.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::PartnerError;

const NO_MESSAGE: &str = "partner API reported failure without a message";

/// A response that passed the success check.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResponse {
    /// Bare array (list endpoints). No `success` flag is expected.
    List(Vec<Value>),
    /// Object with `success: true`
    Object {
        payload: Map<String, Value>,
        message: Option<String>,
    },
}

/// Classify a parsed response body.
///
/// Arrays are always accepted. Any other value is accepted only when it is an
/// object whose `success` field is exactly `true`; otherwise the partner's
/// `message` becomes the error.
pub fn require_success(body: Value) -> Result<UpstreamResponse, PartnerError> {
    match body {
        Value::Array(items) => Ok(UpstreamResponse::List(items)),
        Value::Object(payload) => {
            let message = message_of(&payload);
            if payload.get("success") == Some(&Value::Bool(true)) {
                Ok(UpstreamResponse::Object { payload, message })
            } else {
                Err(PartnerError::upstream(
                    message.unwrap_or_else(|| NO_MESSAGE.to_string()),
                ))
            }
        }
        _ => Err(PartnerError::upstream(NO_MESSAGE)),
    }
}

fn message_of(payload: &Map<String, Value>) -> Option<String> {
    match payload.get("message")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl UpstreamResponse {
    /// Decode a list response into typed records.
    pub fn into_records<T: DeserializeOwned>(self) -> Result<Vec<T>, PartnerError> {
        match self {
            Self::List(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(PartnerError::from))
                .collect(),
            Self::Object { .. } => Err(PartnerError::UnexpectedShape(
                "expected a list, got an object".to_string(),
            )),
        }
    }

    /// Decode the record stored under `key` in an object response,
    /// e.g. `{"success": true, "customer": {...}}`.
    pub fn into_record<T: DeserializeOwned>(self, key: &str) -> Result<T, PartnerError> {
        match self {
            Self::Object { mut payload, .. } => {
                let record = payload.remove(key).ok_or_else(|| {
                    PartnerError::UnexpectedShape(format!("response has no `{}` field", key))
                })?;
                Ok(serde_json::from_value(record)?)
            }
            Self::List(_) => Err(PartnerError::UnexpectedShape(format!(
                "expected an object with `{}`, got a list",
                key
            ))),
        }
    }

    /// The response as received, for read-through endpoints.
    pub fn into_value(self) -> Value {
        match self {
            Self::List(items) => Value::Array(items),
            Self::Object { payload, .. } => Value::Object(payload),
        }
    }
}
