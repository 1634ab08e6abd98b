//! Per-call request description.

use crate::config::Config;
use crate::execution::http::{HeaderOverrides, HttpTransport};
use crate::execution::transformers::ResponseTransformer;
use crate::serialization::{BodySerializer, PathParams, QueryParams, QuerySerializer};
use crate::types::{Credentials, ParseAs, RequestBody};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A single request. Built per call, merged over the client config, and
/// dropped once the call resolves.
///
/// ```rust,ignore
/// let options = RequestOptions::new("/pets/{petId}")
///     .path_param("petId", 42)
///     .query_param("fields", "name")
///     .header("X-Trace", "1");
/// let result = client.get(options).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Path template or absolute URL.
    pub url: String,
    pub path: Option<PathParams>,
    pub query: Option<QueryParams>,
    pub body: Option<RequestBody>,
    pub signal: Option<CancellationToken>,
    /// Client config fields overridden for this call only.
    pub config: Config,
}

impl RequestOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path
            .get_or_insert_with(PathParams::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn path(mut self, path: PathParams) -> Self {
        self.path = Some(path);
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query
            .get_or_insert_with(QueryParams::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers = self.config.headers.set(name, value);
        self
    }

    pub fn header_values<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.config.headers = self.config.headers.set_all(name, values);
        self
    }

    pub fn remove_header(mut self, name: impl Into<String>) -> Self {
        self.config.headers = self.config.headers.remove(name);
        self
    }

    pub fn headers(mut self, headers: HeaderOverrides) -> Self {
        self.config.headers.extend(&headers);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.config.transport = Some(Arc::new(transport));
        self
    }

    pub fn query_serializer(mut self, serializer: impl Into<QuerySerializer>) -> Self {
        self.config.query_serializer = Some(serializer.into());
        self
    }

    pub fn body_serializer(mut self, serializer: impl BodySerializer + 'static) -> Self {
        self.config.body_serializer = Some(Arc::new(serializer));
        self
    }

    pub fn response_transformer(mut self, transformer: impl ResponseTransformer + 'static) -> Self {
        self.config.response_transformer = Some(Arc::new(transformer));
        self
    }

    pub fn parse_as(mut self, parse_as: ParseAs) -> Self {
        self.config.parse_as = Some(parse_as);
        self
    }

    pub fn throw_on_error(mut self, throw_on_error: bool) -> Self {
        self.config.throw_on_error = Some(throw_on_error);
        self
    }

    /// Replace all per-call config overrides at once.
    pub fn config(mut self, config: impl Into<Config>) -> Self {
        self.config = config.into();
        self
    }
}
