//! Request body serializers.
//!
//! A serializer turns a structured (`serde_json::Value`) request body into
//! its wire form. Three are provided: JSON, multipart form-data, and
//! URL-encoded search params. Any `Fn(&Value) -> Result<HttpBody>` closure
//! also works as a serializer.

use super::encoding::{encode_form_component, value_to_string};
use crate::error::{ClientError, Result};
use crate::types::body::{FormData, HttpBody};
use serde_json::{Map, Value};

/// Serialize a structured request body.
pub trait BodySerializer: Send + Sync {
    fn serialize(&self, body: &Value) -> Result<HttpBody>;
}

impl<F> BodySerializer for F
where
    F: Fn(&Value) -> Result<HttpBody> + Send + Sync,
{
    fn serialize(&self, body: &Value) -> Result<HttpBody> {
        self(body)
    }
}

/// `JSON.stringify`-style serializer. This is the client default.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodySerializer;

impl BodySerializer for JsonBodySerializer {
    fn serialize(&self, body: &Value) -> Result<HttpBody> {
        serde_json::to_string(body)
            .map(HttpBody::Text)
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

/// Object body to multipart form-data. Arrays become repeated fields;
/// nested objects are JSON-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDataBodySerializer;

impl BodySerializer for FormDataBodySerializer {
    fn serialize(&self, body: &Value) -> Result<HttpBody> {
        let map = expect_object(body, "form-data")?;
        let mut form = FormData::new();
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items.iter().filter(|v| !v.is_null()) {
                        form.append_text(key.as_str(), value_to_string(item));
                    }
                }
                other => form.append_text(key.as_str(), value_to_string(other)),
            }
        }
        Ok(HttpBody::FormData(form))
    }
}

/// Object body to `application/x-www-form-urlencoded` text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSearchParamsBodySerializer;

impl BodySerializer for UrlSearchParamsBodySerializer {
    fn serialize(&self, body: &Value) -> Result<HttpBody> {
        let map = expect_object(body, "url search params")?;
        let mut pairs = Vec::new();
        for (key, value) in map {
            let key = encode_form_component(key);
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items.iter().filter(|v| !v.is_null()) {
                        let value = encode_form_component(&value_to_string(item));
                        pairs.push(format!("{key}={value}"));
                    }
                }
                other => {
                    let value = encode_form_component(&value_to_string(other));
                    pairs.push(format!("{key}={value}"));
                }
            }
        }
        Ok(HttpBody::Text(pairs.join("&")))
    }
}

fn expect_object<'a>(body: &'a Value, kind: &str) -> Result<&'a Map<String, Value>> {
    body.as_object().ok_or_else(|| {
        ClientError::Serialization(format!("{kind} body must be a JSON object"))
    })
}
