//! Response body reading and decoded payloads.

use crate::error::{ClientError, Result};
use crate::types::body::{Blob, FormData};
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::pin::Pin;

/// Raw response body stream.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Unread response body.
///
/// Every reader consumes the body, so a response can be decoded exactly once.
pub struct ResponseBody {
    stream: ByteStream,
}

impl ResponseBody {
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            stream: Box::pin(futures::stream::once(async move { Ok(bytes) })),
        }
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Collect the full body.
    pub async fn bytes(self) -> Result<Bytes> {
        let mut stream = self.stream;
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Body as text. Invalid UTF-8 sequences are replaced, never rejected.
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn json(self) -> Result<serde_json::Value> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn blob(self, content_type: Option<&str>) -> Result<Blob> {
        let bytes = self.bytes().await?;
        Ok(Blob::new(bytes, content_type.map(str::to_string)))
    }

    pub async fn array_buffer(self) -> Result<Bytes> {
        self.bytes().await
    }

    /// Decode a `multipart/form-data` or `application/x-www-form-urlencoded` body.
    pub async fn form_data(self, content_type: Option<&str>) -> Result<FormData> {
        let bytes = self.bytes().await?;
        crate::serialization::form_data::parse_form_data(content_type, &bytes)
    }

    pub fn into_stream(self) -> ByteStream {
        self.stream
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

/// Decoded success payload.
pub enum ResponseData {
    Json(serde_json::Value),
    Text(String),
    Blob(Blob),
    ArrayBuffer(Bytes),
    FormData(FormData),
    /// Unconsumed body, returned for `ParseAs::Stream`.
    Stream(ByteStream),
}

impl ResponseData {
    /// The `{}` payload used for empty responses (204 / `Content-Length: 0`).
    pub fn empty_object() -> Self {
        ResponseData::Json(serde_json::Value::Object(serde_json::Map::new()))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ResponseData::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            ResponseData::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseData::ArrayBuffer(b) => Some(b),
            ResponseData::Blob(b) => Some(&b.bytes),
            _ => None,
        }
    }

    pub fn as_form_data(&self) -> Option<&FormData> {
        match self {
            ResponseData::FormData(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_stream(self) -> Option<ByteStream> {
        match self {
            ResponseData::Stream(s) => Some(s),
            _ => None,
        }
    }

    /// Deserialize a JSON payload into a typed model.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            ResponseData::Json(v) => Ok(T::deserialize(v)?),
            _ => Err(ClientError::Decode(
                "response payload is not JSON".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for ResponseData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseData::Json(v) => f.debug_tuple("Json").field(v).finish(),
            ResponseData::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ResponseData::Blob(b) => f.debug_tuple("Blob").field(b).finish(),
            ResponseData::ArrayBuffer(b) => f.debug_tuple("ArrayBuffer").field(b).finish(),
            ResponseData::FormData(d) => f.debug_tuple("FormData").field(d).finish(),
            ResponseData::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
