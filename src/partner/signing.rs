//! HMAC-SHA1 request signing for the partner API.
//!
//! Every outbound request carries the caller's fields followed by
//! `company_id`, `timestamp` and `access_token`. The `signature` field is
//! appended last and covers every field before it:
//!
//! ```text
//! canonical = k1=enc(v1)&k2=enc(v2)&...   (insertion order)
//! signature = hex(HMAC-SHA1(secret_key, canonical))
//! ```
//!
//! `enc` is JavaScript's `encodeURIComponent`, which is what the partner
//! verifies against.

use std::fmt;

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::{Map, Value};
use sha1::Sha1;

use super::models::PartnerId;

type HmacSha1 = Hmac<Sha1>;

pub const COMPANY_ID_FIELD: &str = "company_id";
pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const ACCESS_TOKEN_FIELD: &str = "access_token";
pub const SIGNATURE_FIELD: &str = "signature";

/// Current time in milliseconds since epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

// ============================================================================
// Credentials
// ============================================================================

/// Partner account credentials. Immutable once built.
#[derive(Clone)]
pub struct Credentials {
    company_id: PartnerId,
    access_token: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(
        company_id: PartnerId,
        access_token: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            company_id,
            access_token: access_token.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn company_id(&self) -> &PartnerId {
        &self.company_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("company_id", &self.company_id)
            .field("access_token", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Signed envelope
// ============================================================================

/// Request body sent to the partner: caller fields, identity, timestamp and
/// a trailing signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignedEnvelope(Map<String, Value>);

impl SignedEnvelope {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn signature(&self) -> &str {
        self.0
            .get(SIGNATURE_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

/// Build a signed envelope from `fields` without touching them.
///
/// A caller field that shares a name with an identity field is overwritten
/// in place and keeps its position.
pub fn sign(fields: &Map<String, Value>, credentials: &Credentials, now_ms: i64) -> SignedEnvelope {
    let mut envelope = fields.clone();
    let company_id = match &credentials.company_id {
        PartnerId::Number(n) => Value::from(*n),
        PartnerId::Text(s) => Value::from(s.as_str()),
    };
    envelope.insert(COMPANY_ID_FIELD.to_string(), company_id);
    envelope.insert(TIMESTAMP_FIELD.to_string(), Value::from(now_ms));
    envelope.insert(
        ACCESS_TOKEN_FIELD.to_string(),
        Value::from(credentials.access_token.as_str()),
    );

    let signature = compute_signature(&canonical_string(&envelope), &credentials.secret_key);
    envelope.insert(SIGNATURE_FIELD.to_string(), Value::String(signature));

    SignedEnvelope(envelope)
}

/// `key=value` pairs joined by `&`, values URI-component encoded.
pub fn canonical_string(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_uri_component(&field_text(value))))
        .collect::<Vec<_>>()
        .join("&")
}

/// Lowercase hex HMAC-SHA1 digest
pub fn compute_signature(message: &str, secret_key: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Text form of a field value, as a JavaScript template literal renders it.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => field_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Percent-encode everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(raw: &str) -> String {
    // urlencoding leaves only `-_.~` unescaped; restore the marks
    // encodeURIComponent keeps. `%` itself is escaped as `%25`, so these
    // sequences can only come from the marks.
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn creds() -> Credentials {
        Credentials::new(PartnerId::Number(11), "token-abc", "s3cret")
    }

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fields must be an object"),
        }
    }

    #[test]
    fn test_hmac_sha1_known_vector() {
        // RFC 2202 test case 2
        assert_eq!(
            compute_signature("what do ya want for nothing?", "Jefe"),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_envelope_field_order() {
        let envelope = sign(&fields(json!({"name": "Ann", "phone": "555"})), &creds(), NOW);
        let keys: Vec<&str> = envelope.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["name", "phone", "company_id", "timestamp", "access_token", "signature"]
        );
        assert_eq!(envelope.fields()["company_id"], json!(11));
        assert_eq!(envelope.fields()["timestamp"], json!(NOW));
        assert_eq!(envelope.fields()["access_token"], json!("token-abc"));
    }

    #[test]
    fn test_signature_covers_all_prior_fields() {
        let envelope = sign(&fields(json!({"page": 2})), &creds(), NOW);
        let expected = compute_signature(
            "page=2&company_id=11&timestamp=1700000000000&access_token=token-abc",
            "s3cret",
        );
        assert_eq!(envelope.signature(), expected);
    }

    #[test]
    fn test_sign_does_not_mutate_input() {
        let input = fields(json!({"title": "Pizza"}));
        let before = input.clone();
        let _ = sign(&input, &creds(), NOW);
        assert_eq!(input, before);
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let input = fields(json!({"name": "Ann", "address": "1 Main St"}));
        let a = sign(&input, &creds(), NOW);
        let b = sign(&input, &creds(), NOW);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_sensitive_to_every_input() {
        let base_fields = fields(json!({"name": "Ann", "phone": "555"}));
        let base = sign(&base_fields, &creds(), NOW).signature().to_string();

        let changed_value = fields(json!({"name": "Ann", "phone": "556"}));
        assert_ne!(sign(&changed_value, &creds(), NOW).signature(), base);

        let extra_key = fields(json!({"name": "Ann", "phone": "555", "x": ""}));
        assert_ne!(sign(&extra_key, &creds(), NOW).signature(), base);

        let other_secret = Credentials::new(PartnerId::Number(11), "token-abc", "other");
        assert_ne!(sign(&base_fields, &other_secret, NOW).signature(), base);

        assert_ne!(sign(&base_fields, &creds(), NOW + 1).signature(), base);
    }

    #[test]
    fn test_signature_follows_insertion_order() {
        let mut ab = Map::new();
        ab.insert("a".to_string(), json!("1"));
        ab.insert("b".to_string(), json!("2"));

        let mut ba = Map::new();
        ba.insert("b".to_string(), json!("2"));
        ba.insert("a".to_string(), json!("1"));

        let mut ab_again = Map::new();
        ab_again.insert("a".to_string(), json!("1"));
        ab_again.insert("b".to_string(), json!("2"));

        let sig_ab = sign(&ab, &creds(), NOW).signature().to_string();
        assert_ne!(sig_ab, sign(&ba, &creds(), NOW).signature());
        assert_eq!(sig_ab, sign(&ab_again, &creds(), NOW).signature());
    }

    #[test]
    fn test_reserved_caller_field_overwritten_in_place() {
        let envelope = sign(&fields(json!({"timestamp": 1, "name": "Ann"})), &creds(), NOW);
        let keys: Vec<&str> = envelope.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["timestamp", "name", "company_id", "access_token", "signature"]
        );
        assert_eq!(envelope.fields()["timestamp"], json!(NOW));
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("abc-_.~!*'()"), "abc-_.~!*'()");
        assert_eq!(encode_uri_component("1 Main St"), "1%20Main%20St");
        assert_eq!(encode_uri_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_uri_component("100%"), "100%25");
        assert_eq!(encode_uri_component("%21"), "%2521");
        assert_eq!(encode_uri_component("+972"), "%2B972");
        assert_eq!(encode_uri_component("שלום"), "%D7%A9%D7%9C%D7%95%D7%9D");
    }

    #[test]
    fn test_canonical_string_value_rendering() {
        let map = fields(json!({
            "s": "x y",
            "n": 3,
            "b": true,
            "z": null,
            "arr": [1, null, "a b"],
            "obj": {"k": "v"}
        }));
        assert_eq!(
            canonical_string(&map),
            "s=x%20y&n=3&b=true&z=null&arr=1%2C%2Ca%20b&obj=%5Bobject%20Object%5D"
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let shown = format!("{:?}", creds());
        assert!(!shown.contains("token-abc"));
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("11"));
    }

    #[test]
    fn test_text_company_id_stays_string() {
        let c = Credentials::new(PartnerId::Text("acme".to_string()), "t", "k");
        let envelope = sign(&Map::new(), &c, NOW);
        assert_eq!(envelope.fields()["company_id"], json!("acme"));
        assert_eq!(c.company_id(), &PartnerId::Text("acme".to_string()));
    }
}
