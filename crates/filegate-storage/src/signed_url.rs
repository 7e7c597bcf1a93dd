//! Signed-URL response normalization.
//!
//! The external service has returned the signed URL under different key names
//! across API versions, and some deployments return a bare string. The
//! ordered fallback list here reflects that versioning uncertainty, not
//! business logic.

use serde_json::Value;

/// Key names tried, in priority order, on an object-shaped signing response.
const URL_KEYS: [&str; 4] = ["signedURL", "signed_url", "publicURL", "public_url"];

/// Extract the URL from a signing response that is either a bare string or an
/// object carrying the URL under one of several known keys. A key holding a
/// non-string value is skipped in favor of the next candidate.
pub fn extract_signed_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => URL_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(String::from),
        _ => None,
    }
}
