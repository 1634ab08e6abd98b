//! Normalized request outcome.

use crate::error::{ClientError, Result};
use crate::execution::http::{ResponseParts, TransportRequest};
use crate::types::ResponseData;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Either the decoded success payload or the normalized error payload.
#[derive(Debug)]
pub enum Payload {
    Data(ResponseData),
    Error(Value),
}

/// Outcome of one request: exactly one of `data` / `error`, plus the request
/// that was sent and the response status and headers.
#[derive(Debug)]
pub struct RequestResult {
    pub request: TransportRequest,
    pub response: ResponseParts,
    pub payload: Payload,
}

impl RequestResult {
    pub fn is_ok(&self) -> bool {
        matches!(self.payload, Payload::Data(_))
    }

    pub fn data(&self) -> Option<&ResponseData> {
        match &self.payload {
            Payload::Data(data) => Some(data),
            Payload::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Error(error) => Some(error),
            Payload::Data(_) => None,
        }
    }

    pub fn into_data(self) -> Option<ResponseData> {
        match self.payload {
            Payload::Data(data) => Some(data),
            Payload::Error(_) => None,
        }
    }

    /// Success payload, or the error payload as `ClientError::ErrorResponse`.
    pub fn into_result(self) -> Result<ResponseData> {
        match self.payload {
            Payload::Data(data) => Ok(data),
            Payload::Error(error) => Err(ClientError::ErrorResponse {
                status: self.response.status.as_u16(),
                error,
            }),
        }
    }

    /// Deserialize a JSON success payload into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.into_result()?.deserialize()
    }
}
