//! Tracing Module - Logging and Debugging Instrumentation
//!
//! Subscriber setup plus a small per-request tracer that logs request and
//! response details with sensitive header values masked.

use crate::error::ClientError;
use crate::types::HttpBody;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Subscriber settings for [`init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `"info"` or
    /// `"api_fetch_client=debug"`.
    pub level: String,
    pub format: OutputFormat,
    pub with_target: bool,
    pub mask_sensitive_values: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: OutputFormat::Text,
            with_target: true,
            mask_sensitive_values: true,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    pub fn with_mask_sensitive_values(mut self, mask: bool) -> Self {
        self.mask_sensitive_values = mask;
        self
    }
}

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    set_mask_sensitive_values(config.mask_sensitive_values);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        OutputFormat::Text => registry
            .with(fmt::layer().with_target(config.with_target))
            .try_init(),
        OutputFormat::Json => registry
            .with(fmt::layer().json().with_target(config.with_target))
            .try_init(),
    }
}

static MASK_SENSITIVE_VALUES: AtomicBool = AtomicBool::new(true);

pub fn set_mask_sensitive_values(mask: bool) {
    MASK_SENSITIVE_VALUES.store(mask, Ordering::Relaxed);
}

pub fn get_mask_sensitive_values() -> bool {
    MASK_SENSITIVE_VALUES.load(Ordering::Relaxed)
}

/// Shorten a secret so that only its edges are logged.
pub fn mask_sensitive_value(value: &str) -> String {
    if !get_mask_sensitive_values() {
        return value.to_string();
    }
    if let Some(token) = value.strip_prefix("Bearer ") {
        return format!("Bearer {}", mask_middle(token, 4, 4, 8));
    }
    mask_middle(value, 6, 4, 16)
}

fn mask_middle(value: &str, head: usize, tail: usize, min_len: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= min_len {
        return value.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{start}...{end}")
}

fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.contains("authorization")
        || name.contains("cookie")
        || name.contains("key")
        || name.contains("token")
}

/// Render headers as a JSON object, masking credentials.
pub fn format_headers_for_logging(headers: &HeaderMap) -> String {
    let map: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .map(|(k, v)| {
            let value = v.to_str().unwrap_or("<invalid>");
            let value = if is_sensitive_header(k.as_str()) {
                mask_sensitive_value(value)
            } else {
                value.to_string()
            };
            (k.as_str().to_string(), serde_json::Value::String(value))
        })
        .collect();
    serde_json::Value::Object(map).to_string()
}

fn describe_body(body: Option<&HttpBody>) -> String {
    match body {
        None => "<none>".to_string(),
        Some(HttpBody::Text(text)) => format!("<{} bytes of text>", text.len()),
        Some(HttpBody::Bytes(bytes)) => format!("<{} bytes>", bytes.len()),
        Some(HttpBody::FormData(form)) => format!("<form-data: {} fields>", form.len()),
    }
}

/// Per-request tracer. Created once the URL is known.
#[derive(Debug, Clone)]
pub struct RequestTracer {
    method: String,
    url: String,
    started: Instant,
}

impl RequestTracer {
    pub fn start(method: impl Into<String>, url: impl Into<String>) -> Self {
        let tracer = Self {
            method: method.into(),
            url: url.into(),
            started: Instant::now(),
        };
        debug!(method = %tracer.method, url = %tracer.url, "Request started");
        tracer
    }

    pub fn trace_request_details(&self, headers: &HeaderMap, body: Option<&HttpBody>) {
        debug!(
            method = %self.method,
            url = %self.url,
            request_headers = %format_headers_for_logging(headers),
            request_body = %describe_body(body),
            "Request details"
        );
    }

    pub fn trace_response(&self, status: StatusCode, headers: &HeaderMap) {
        debug!(
            method = %self.method,
            url = %self.url,
            status_code = status.as_u16(),
            response_headers = %format_headers_for_logging(headers),
            "Response received"
        );
    }

    pub fn trace_parse(&self, parse_as: crate::types::ParseAs) {
        debug!(method = %self.method, url = %self.url, parse_as = %parse_as, "Parsing response");
    }

    pub fn trace_request_complete(&self, status: StatusCode) {
        info!(
            method = %self.method,
            url = %self.url,
            status_code = status.as_u16(),
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Request completed"
        );
    }

    pub fn trace_error_response(&self, status: StatusCode, error: &serde_json::Value) {
        warn!(
            method = %self.method,
            url = %self.url,
            status_code = status.as_u16(),
            error = %error,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Request returned an error response"
        );
    }

    pub fn trace_failure(&self, error: &ClientError) {
        warn!(
            method = %self.method,
            url = %self.url,
            error = %error,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Request failed"
        );
    }
}
