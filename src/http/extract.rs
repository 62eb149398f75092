//! Inbound payload extraction.
//!
//! # Responsibilities
//! - Normalize a request into a single candidate payload
//! - Precedence: raw body, then form fields, then query parameters
//! - Re-encode field/parameter mappings as a JSON object
//!
//! # Design Decisions
//! - A form-encoded body is field data, not a raw payload; it takes the
//!   form branch even though the transport body is non-empty
//! - Mapping values that parse as JSON scalars (numbers, booleans) are
//!   emitted as those scalars so `x=4` can satisfy a numeric schema;
//!   everything else stays a string
//! - First occurrence wins for duplicate keys
//! - No payload source at all yields an empty payload; the codec turns
//!   that into a conversion error

use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Produce the candidate payload for a request.
pub fn payload(parts: &Parts, body: &[u8]) -> Vec<u8> {
    if !body.is_empty() {
        if is_form(parts) {
            return fields_to_json(form_urlencoded::parse(body));
        }
        return body.to_vec();
    }
    match parts.uri.query() {
        Some(query) if !query.is_empty() => {
            fields_to_json(form_urlencoded::parse(query.as_bytes()))
        }
        _ => Vec::new(),
    }
}

fn is_form(parts: &Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or("")
                .trim()
                .eq_ignore_ascii_case(FORM_CONTENT_TYPE)
        })
        .unwrap_or(false)
}

/// Serialize key/value fields as a JSON object.
fn fields_to_json<'a>(pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>) -> Vec<u8> {
    let mut map = serde_json::Map::new();
    for (key, value) in pairs {
        map.entry(key.into_owned())
            .or_insert_with(|| scalar_or_string(&value));
    }
    // A map of owned scalars cannot fail to serialize.
    serde_json::to_vec(&serde_json::Value::Object(map)).unwrap_or_default()
}

/// Parse a field value as a JSON scalar where possible, else keep the text.
fn scalar_or_string(value: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(v @ serde_json::Value::Number(_)) | Ok(v @ serde_json::Value::Bool(_)) => v,
        _ => serde_json::Value::String(value.to_string()),
    }
}
