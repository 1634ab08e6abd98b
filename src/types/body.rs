//! Request and form body types.

use crate::error::{ClientError, Result};
use bytes::Bytes;
use serde::Serialize;

/// Binary payload with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl Blob {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A single form-data entry value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File {
        blob: Blob,
        filename: Option<String>,
    },
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            FormValue::File { .. } => None,
        }
    }
}

/// Ordered multi-map of form fields. Repeated names are kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: FormValue) {
        self.entries.push((name.into(), value));
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.append(name, FormValue::Text(value.into()));
    }

    pub fn append_file(&mut self, name: impl Into<String>, blob: Blob, filename: Option<String>) {
        self.append(name, FormValue::File { blob, filename });
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormValue> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FormData {
    type Item = (String, FormValue);
    type IntoIter = std::vec::IntoIter<(String, FormValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Request body as supplied by the caller.
///
/// Only `Value` bodies go through the configured body serializer. The other
/// variants are already in wire form and are sent unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Value(serde_json::Value),
    Text(String),
    Bytes(Bytes),
    FormData(FormData),
}

impl RequestBody {
    /// Build a structured body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(RequestBody::Value)
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// A body that carries no payload: JSON `null`, empty text, or empty bytes.
    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Value(v) => v.is_null(),
            RequestBody::Text(s) => s.is_empty(),
            RequestBody::Bytes(b) => b.is_empty(),
            RequestBody::FormData(_) => false,
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Value(value)
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        RequestBody::Text(value)
    }
}

impl From<&str> for RequestBody {
    fn from(value: &str) -> Self {
        RequestBody::Text(value.to_string())
    }
}

impl From<Bytes> for RequestBody {
    fn from(value: Bytes) -> Self {
        RequestBody::Bytes(value)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(value: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(value))
    }
}

impl From<FormData> for RequestBody {
    fn from(value: FormData) -> Self {
        RequestBody::FormData(value)
    }
}

/// Body in wire form, as handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Text(String),
    Bytes(Bytes),
    FormData(FormData),
}

impl HttpBody {
    pub fn is_empty(&self) -> bool {
        match self {
            HttpBody::Text(s) => s.is_empty(),
            HttpBody::Bytes(b) => b.is_empty(),
            HttpBody::FormData(_) => false,
        }
    }

    /// Text view of the body, if it is textual or valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            HttpBody::Text(s) => Some(s),
            HttpBody::Bytes(b) => std::str::from_utf8(b).ok(),
            HttpBody::FormData(_) => None,
        }
    }
}
