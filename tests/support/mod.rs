//! Shared test transports and mock-server helpers.

#![allow(dead_code)]

use api_fetch_client::error::Result;
use api_fetch_client::execution::http::{HttpTransport, TransportRequest, TransportResponse};
use api_fetch_client::types::ResponseBody;
use async_trait::async_trait;
use bytes::Bytes;
use mockito::{Server, ServerGuard};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::{Arc, Mutex};

/// Canned response returned by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Bytes,
}

impl CannedResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status)
            .header("content-type", "application/json")
            .body(body)
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::new(status)
            .header("content-type", "text/plain; charset=utf-8")
            .body(body)
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = Bytes::copy_from_slice(body.as_bytes());
        self
    }
}

/// In-memory transport that records every request and answers with a
/// fixed response.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    response: CannedResponse,
}

impl RecordingTransport {
    pub fn new(response: CannedResponse) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> TransportRequest {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);

        let mut headers = HeaderMap::new();
        for (name, value) in &self.response.headers {
            headers.append(
                HeaderName::from_static(*name),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        Ok(TransportResponse::new(
            StatusCode::from_u16(self.response.status).unwrap(),
            headers,
            ResponseBody::from_bytes(self.response.body.clone()),
        ))
    }
}

/// Transport that always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingTransport(pub api_fetch_client::ClientError);

#[async_trait]
impl HttpTransport for FailingTransport {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse> {
        Err(self.0.clone())
    }
}

/// Start an async mockito server.
pub async fn start_server() -> ServerGuard {
    Server::new_async().await
}
