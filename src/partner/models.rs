//! Partner API records
//!
//! Records the gateway creates are partially typed: the fields it reads are
//! named and everything else is carried through `extra`. Listed tasks are
//! kept as raw JSON so they can be served back unchanged.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

// ============================================================================
// PartnerId
// ============================================================================

/// Identifier issued by the partner API.
///
/// The partner uses numeric ids, but string ids are accepted as well and
/// echoed back in the form they were received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PartnerId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PartnerId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PartnerId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// ============================================================================
// Outbound payloads
// ============================================================================

/// Fields sent to `POST /customers`
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Fields sent to `POST /tasks`
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub customer_id: PartnerId,
    pub address: String,
    pub title: String,
}

// ============================================================================
// Upstream records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: PartnerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A delivery task (the partner's name for an order), as returned by
/// `POST /tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: PartnerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<PartnerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Listed tasks
// ============================================================================
//
// Task listings are served back verbatim, so they stay as raw JSON. Only the
// two fields the history scan reads are looked at.

/// Creation time of a listed task in milliseconds since epoch.
///
/// Accepts a timestamp string or a number of milliseconds. Anything else,
/// including a missing or null field, yields `None`.
pub fn task_created_at_ms(task: &Value) -> Option<i64> {
    match task.get("created_at")? {
        Value::String(raw) => parse_timestamp_ms(raw),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Strictly newer than `cutoff_ms`. Tasks without a readable creation time
/// never qualify.
pub fn task_created_after(task: &Value, cutoff_ms: i64) -> bool {
    task_created_at_ms(task).is_some_and(|ms| ms > cutoff_ms)
}

/// `customer.phone` of a listed task in text form. Numeric phones are
/// rendered as their digits.
pub fn task_customer_phone(task: &Value) -> Option<String> {
    match task.get("customer")?.get("phone")? {
        Value::String(phone) => Some(phone.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse an upstream timestamp. Offset-less values are read as UTC.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partner_id_keeps_wire_form() {
        let numeric: PartnerId = serde_json::from_value(json!(42)).unwrap();
        let text: PartnerId = serde_json::from_value(json!("c-42")).unwrap();

        assert_eq!(numeric, PartnerId::Number(42));
        assert_eq!(text, PartnerId::Text("c-42".to_string()));
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("c-42"));
    }

    #[test]
    fn test_created_task_keeps_unknown_fields() {
        let raw = json!({
            "id": 301,
            "customer_id": 17,
            "title": "Flowers",
            "status": 3,
            "way_points": [{"position": 1}]
        });

        let task: Task = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(task.id, PartnerId::Number(301));
        assert_eq!(task.extra.get("status"), Some(&json!(3)));

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let utc = parse_timestamp_ms("2024-03-01T10:00:00Z").unwrap();
        assert_eq!(utc, 1_709_287_200_000);
        assert_eq!(parse_timestamp_ms("2024-03-01T10:00:00.000Z"), Some(utc));
        assert_eq!(parse_timestamp_ms("2024-03-01T12:00:00+02:00"), Some(utc));
        assert_eq!(parse_timestamp_ms("2024-03-01T10:00:00"), Some(utc));
        assert_eq!(parse_timestamp_ms("2024-03-01 10:00:00"), Some(utc));
        assert_eq!(parse_timestamp_ms("yesterday"), None);
    }

    #[test]
    fn test_created_after_is_strict() {
        let task = json!({"id": 1, "created_at": "2024-03-01T10:00:00Z"});

        assert!(task_created_after(&task, 1_709_287_199_999));
        assert!(!task_created_after(&task, 1_709_287_200_000));
    }

    #[test]
    fn test_created_at_accepts_epoch_millis() {
        let task = json!({"created_at": 1_709_287_200_000_i64});
        assert_eq!(task_created_at_ms(&task), Some(1_709_287_200_000));
    }

    #[test]
    fn test_listed_task_with_missing_or_null_fields() {
        let no_id = json!({"title": "no id"});
        let nulls = json!({"id": 1, "customer": null, "created_at": null});

        assert!(!task_created_after(&no_id, i64::MIN));
        assert!(!task_created_after(&nulls, i64::MIN));
        assert_eq!(task_customer_phone(&no_id), None);
        assert_eq!(task_customer_phone(&nulls), None);
    }

    #[test]
    fn test_customer_phone_text_form() {
        let text = json!({"customer": {"phone": "0555"}});
        let numeric = json!({"customer": {"phone": 555}});
        let other = json!({"customer": {"phone": true}});

        assert_eq!(task_customer_phone(&text).as_deref(), Some("0555"));
        assert_eq!(task_customer_phone(&numeric).as_deref(), Some("555"));
        assert_eq!(task_customer_phone(&other), None);
    }
}
