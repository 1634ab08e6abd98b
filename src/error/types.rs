//! Core error types.

use thiserror::Error;

/// Errors produced while shaping, dispatching, or normalizing a request.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// A `{name}` placeholder in the path template has no value.
    #[error("Missing path parameter: {0}")]
    MissingPathParam(String),

    /// A header name or value could not be represented on the wire.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The configured body serializer rejected the request body.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// The transport failed before producing a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request was cancelled through its cancellation token.
    #[error("Request aborted")]
    Aborted,

    /// A successful response body could not be read or decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Non-2xx response, raised because `throw_on_error` is enabled.
    ///
    /// `error` holds the normalized error payload: parsed JSON when the body
    /// was valid JSON, the raw text otherwise, and `{}` for empty bodies.
    #[error("HTTP {status}: {error}")]
    ErrorResponse {
        status: u16,
        error: serde_json::Value,
    },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
