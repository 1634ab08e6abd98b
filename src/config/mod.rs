//! Client configuration.
//!
//! [`ClientConfig`] is the resolved set of defaults a client runs with.
//! [`Config`] is a partial override: every field left unset inherits from the
//! config it is merged onto. Merging is a pure function, [`merge_configs`].

mod store;

pub use store::ConfigStore;

use crate::defaults;
use crate::error::Result;
use crate::execution::http::{
    HeaderOverrides, HeaderSource, HttpTransport, ReqwestTransport, merge_headers,
};
use crate::execution::transformers::ResponseTransformer;
use crate::serialization::{BodySerializer, JsonBodySerializer, QuerySerializer};
use crate::types::{Credentials, ParseAs};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Resolved client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Prepended to relative request URLs. Never ends with `/`.
    pub base_url: String,
    pub headers: HeaderMap,
    pub credentials: Option<Credentials>,
    pub transport: Arc<dyn HttpTransport>,
    pub query_serializer: QuerySerializer,
    /// Applied to structured (`RequestBody::Value`) bodies.
    pub body_serializer: Arc<dyn BodySerializer>,
    /// Applied to successfully decoded JSON payloads.
    pub response_transformer: Option<Arc<dyn ResponseTransformer>>,
    pub parse_as: ParseAs,
    pub throw_on_error: bool,
}

impl ClientConfig {
    /// Baseline configuration.
    ///
    /// The base URL is read from `API_FETCH_CLIENT_BASE_URL` when set.
    pub fn create_default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(defaults::DEFAULT_CONTENT_TYPE),
        );
        Self {
            base_url: strip_trailing_slash(&defaults::base_url_from_env()),
            headers,
            credentials: None,
            transport: Arc::new(ReqwestTransport::default()),
            query_serializer: QuerySerializer::default(),
            body_serializer: Arc::new(JsonBodySerializer),
            response_transformer: None,
            parse_as: ParseAs::Auto,
            throw_on_error: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::create_default()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("credentials", &self.credentials)
            .field("query_serializer", &self.query_serializer)
            .field("response_transformer", &self.response_transformer.is_some())
            .field("parse_as", &self.parse_as)
            .field("throw_on_error", &self.throw_on_error)
            .finish_non_exhaustive()
    }
}

/// Partial configuration. Unset fields inherit when merged.
#[derive(Clone, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub headers: HeaderOverrides,
    pub credentials: Option<Credentials>,
    pub transport: Option<Arc<dyn HttpTransport>>,
    pub query_serializer: Option<QuerySerializer>,
    pub body_serializer: Option<Arc<dyn BodySerializer>>,
    pub response_transformer: Option<Arc<dyn ResponseTransformer>>,
    pub parse_as: Option<ParseAs>,
    pub throw_on_error: Option<bool>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("credentials", &self.credentials)
            .field("transport", &self.transport.is_some())
            .field("query_serializer", &self.query_serializer)
            .field("body_serializer", &self.body_serializer.is_some())
            .field("response_transformer", &self.response_transformer.is_some())
            .field("parse_as", &self.parse_as)
            .field("throw_on_error", &self.throw_on_error)
            .finish()
    }
}

/// Fluent builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
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

    /// Drop a header inherited from the config this is merged onto.
    pub fn remove_header(mut self, name: impl Into<String>) -> Self {
        self.config.headers = self.config.headers.remove(name);
        self
    }

    pub fn headers(mut self, headers: HeaderOverrides) -> Self {
        self.config.headers.extend(&headers);
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

    pub fn transport_arc(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.config.transport = Some(transport);
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

    pub fn build(self) -> Config {
        self.config
    }
}

impl From<ConfigBuilder> for Config {
    fn from(builder: ConfigBuilder) -> Self {
        builder.build()
    }
}

/// Merge `overrides` onto `base`, producing a new config.
///
/// Headers are merged with [`merge_headers`]; every other set field replaces
/// the inherited one. Neither input is modified.
pub fn merge_configs(base: &ClientConfig, overrides: &Config) -> Result<ClientConfig> {
    let headers = if overrides.headers.is_empty() {
        base.headers.clone()
    } else {
        merge_headers([
            Some(HeaderSource::Map(&base.headers)),
            Some(HeaderSource::Overrides(&overrides.headers)),
        ])?
    };

    let base_url = match &overrides.base_url {
        Some(url) => strip_trailing_slash(url),
        None => base.base_url.clone(),
    };

    Ok(ClientConfig {
        base_url,
        headers,
        credentials: overrides.credentials.or(base.credentials),
        transport: overrides
            .transport
            .clone()
            .unwrap_or_else(|| Arc::clone(&base.transport)),
        query_serializer: overrides
            .query_serializer
            .clone()
            .unwrap_or_else(|| base.query_serializer.clone()),
        body_serializer: overrides
            .body_serializer
            .clone()
            .unwrap_or_else(|| Arc::clone(&base.body_serializer)),
        response_transformer: overrides
            .response_transformer
            .clone()
            .or_else(|| base.response_transformer.clone()),
        parse_as: overrides.parse_as.unwrap_or(base.parse_as),
        throw_on_error: overrides.throw_on_error.unwrap_or(base.throw_on_error),
    })
}

fn strip_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
