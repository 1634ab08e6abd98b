//! HTTP transport abstraction.
//!
//! The request pipeline never talks to the network directly. It hands a
//! fully shaped [`TransportRequest`] to an injected [`HttpTransport`] (the
//! "custom fetch" of the client) and reads back a [`TransportResponse`].
//! Tests inject in-memory transports; production code uses
//! [`ReqwestTransport`](super::client::ReqwestTransport).

use crate::error::Result;
use crate::types::{Credentials, HttpBody, ResponseBody};
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<HttpBody>,
    pub credentials: Option<Credentials>,
    /// Cancellation signal. Transports should stop and return
    /// [`ClientError::Aborted`](crate::error::ClientError::Aborted) once it fires.
    pub signal: Option<CancellationToken>,
}

/// Status line and headers of a response, kept after the body is consumed.
#[derive(Debug, Clone)]
pub struct ResponseParts {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseParts {
    /// `true` for 2xx statuses.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Transport-level response data.
#[derive(Debug)]
pub struct TransportResponse {
    pub parts: ResponseParts,
    pub body: ResponseBody,
}

impl TransportResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            parts: ResponseParts { status, headers },
            body,
        }
    }

    pub fn ok(&self) -> bool {
        self.parts.ok()
    }

    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn into_parts(self) -> (ResponseParts, ResponseBody) {
        (self.parts, self.body)
    }
}

/// Custom HTTP transport.
///
/// Implementations perform exactly one network exchange per call. Errors
/// returned here reach the caller unchanged.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}
