//! Percent-encoding helpers shared by the query, path, and form serializers.

use crate::error::{ClientError, Result};
use serde_json::Value;

const RESERVED: &[u8] = b":/?#[]@!$&'()*+,;=";

/// Encode everything except the RFC 3986 unreserved set.
pub fn encode_component(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Like [`encode_component`] but keeps reserved characters literal.
pub fn encode_allow_reserved(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b.is_ascii_alphanumeric() || b"-_.~".contains(&b) || RESERVED.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

pub fn encode_value(input: &str, allow_reserved: bool) -> String {
    if allow_reserved {
        encode_allow_reserved(input)
    } else {
        encode_component(input)
    }
}

/// Decode a percent-encoded component.
pub fn decode_component(input: &str) -> Result<String> {
    urlencoding::decode(input)
        .map(|s| s.into_owned())
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Decode an `application/x-www-form-urlencoded` component (`+` is a space).
pub fn decode_form_component(input: &str) -> Result<String> {
    decode_component(&input.replace('+', " "))
}

/// Encode an `application/x-www-form-urlencoded` component (spaces become `+`).
pub fn encode_form_component(input: &str) -> String {
    encode_component(input).replace("%20", "+")
}

/// String form of a JSON value: strings unquoted, everything else as JSON text.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
