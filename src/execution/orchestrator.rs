//! Request orchestration.
//!
//! One call runs through five phases:
//!
//! 1. Configuring: merge the config snapshot with the per-call overrides.
//! 2. Serializing: encode the body and drop `Content-Type` when there is none.
//! 3. Dispatching: build the URL and invoke the transport exactly once.
//! 4. Parsing: decode the success body or normalize the error body.
//! 5. Resolved: hand back a [`RequestResult`], or raise per [`ErrorMode`].

use super::http::{ResponseParts, TransportRequest};
use super::parse_as::resolve_parse_as;
use super::url::{UrlParts, get_url};
use crate::client::{Payload, RequestOptions, RequestResult};
use crate::config::{ClientConfig, merge_configs};
use crate::error::{ClientError, Result};
use crate::observability::RequestTracer;
use crate::serialization::BodySerializer;
use crate::types::{HttpBody, ParseAs, RequestBody, ResponseBody, ResponseData};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

/// How a non-2xx response reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Return the normalized error inside the [`RequestResult`].
    Return,
    /// Fail with [`ClientError::ErrorResponse`].
    Raise,
}

impl ErrorMode {
    pub fn from_throw_on_error(throw_on_error: bool) -> Self {
        if throw_on_error {
            ErrorMode::Raise
        } else {
            ErrorMode::Return
        }
    }

    /// Apply the mode to a resolved result.
    pub fn resolve(self, result: RequestResult) -> Result<RequestResult> {
        match (self, result.payload) {
            (ErrorMode::Raise, Payload::Error(error)) => Err(ClientError::ErrorResponse {
                status: result.response.status.as_u16(),
                error,
            }),
            (_, payload) => Ok(RequestResult { payload, ..result }),
        }
    }
}

/// Run one request against a config snapshot.
pub async fn execute(snapshot: &ClientConfig, options: RequestOptions) -> Result<RequestResult> {
    let RequestOptions {
        method,
        url,
        path,
        query,
        body,
        signal,
        config: overrides,
    } = options;

    debug!(method = %method, url = %url, "Configuring request");
    let config = merge_configs(snapshot, &overrides)?;
    let mode = ErrorMode::from_throw_on_error(config.throw_on_error);

    let body = serialize_body(&*config.body_serializer, body)?;
    let mut headers = config.headers.clone();
    if body.is_none() {
        headers.remove(CONTENT_TYPE);
    }
    debug!(has_body = body.is_some(), "Serialized request body");

    let url = get_url(UrlParts {
        base_url: &config.base_url,
        url: &url,
        path: path.as_ref(),
        query: query.as_ref(),
        query_serializer: &config.query_serializer,
    })?;

    let request = TransportRequest {
        method,
        url,
        headers,
        body,
        credentials: config.credentials,
        signal,
    };
    let tracer = RequestTracer::start(request.method.as_str(), &request.url);
    tracer.trace_request_details(&request.headers, request.body.as_ref());

    let response = match config.transport.send(request.clone()).await {
        Ok(response) => response,
        Err(e) => {
            tracer.trace_failure(&e);
            return Err(e);
        }
    };
    let (parts, body) = response.into_parts();
    tracer.trace_response(parts.status, &parts.headers);

    let payload = if parts.ok() {
        let parse_as = resolve_parse_as(config.parse_as, parts.content_type());
        tracer.trace_parse(parse_as);
        let data = parse_success(&config, &parts, parse_as, body)
            .await
            .inspect_err(|e| tracer.trace_failure(e))?;
        tracer.trace_request_complete(parts.status);
        Payload::Data(data)
    } else {
        let error = normalize_error(body).await?;
        tracer.trace_error_response(parts.status, &error);
        Payload::Error(error)
    };

    mode.resolve(RequestResult {
        request,
        response: parts,
        payload,
    })
}

/// Encode the body for the wire. Empty bodies come back as `None`.
fn serialize_body(
    serializer: &dyn BodySerializer,
    body: Option<RequestBody>,
) -> Result<Option<HttpBody>> {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        return Ok(None);
    };
    let body = match body {
        RequestBody::Value(value) => serializer.serialize(&value)?,
        RequestBody::Text(text) => HttpBody::Text(text),
        RequestBody::Bytes(bytes) => HttpBody::Bytes(bytes),
        RequestBody::FormData(form) => HttpBody::FormData(form),
    };
    Ok((!body.is_empty()).then_some(body))
}

async fn parse_success(
    config: &ClientConfig,
    parts: &ResponseParts,
    parse_as: ParseAs,
    body: ResponseBody,
) -> Result<ResponseData> {
    if parts.status == StatusCode::NO_CONTENT || parts.content_length() == Some(0) {
        return Ok(ResponseData::empty_object());
    }

    let content_type = parts.content_type();
    let data = match parse_as {
        ParseAs::Stream => ResponseData::Stream(body.into_stream()),
        ParseAs::Json => {
            let mut value = body.json().await?;
            if let Some(transformer) = &config.response_transformer {
                value = transformer.transform(value).await?;
            }
            ResponseData::Json(value)
        }
        ParseAs::Text => ResponseData::Text(body.text().await?),
        ParseAs::ArrayBuffer => ResponseData::ArrayBuffer(body.array_buffer().await?),
        ParseAs::FormData => ResponseData::FormData(body.form_data(content_type).await?),
        ParseAs::Blob | ParseAs::Auto => ResponseData::Blob(body.blob(content_type).await?),
    };
    Ok(data)
}

/// Error payload: parsed JSON if possible, else the raw text. Falsy
/// payloads (`null`, `false`, `0`, `""`) become `{}`.
async fn normalize_error(body: ResponseBody) -> Result<Value> {
    let text = body.text().await?;
    let error = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
    Ok(if is_falsy(&error) {
        Value::Object(serde_json::Map::new())
    } else {
        error
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
