//! api-fetch-client
//!
//! HTTP request runtime for clients generated from API schemas such as
//! OpenAPI documents. Generated code describes a call (method, path template,
//! query, headers, body, decoding hints) and the runtime turns it into one
//! transport call, returning a uniform success/error result.
//!
//! ```rust,ignore
//! use api_fetch_client::prelude::*;
//!
//! let client = create_client(Config::builder().base_url("https://petstore.example/v1"))?;
//! let result = client
//!     .get(RequestOptions::new("/pets/{petId}").path_param("petId", 42))
//!     .await?;
//! match result.payload {
//!     Payload::Data(data) => println!("{data:?}"),
//!     Payload::Error(error) => eprintln!("{error}"),
//! }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod observability;
pub mod serialization;
pub mod types;

pub use client::{Client, Payload, RequestOptions, RequestResult, create_client};
pub use config::{ClientConfig, Config, ConfigBuilder, ConfigStore, merge_configs};
pub use error::{ClientError, Result};

/// Common imports for generated clients.
pub mod prelude {
    pub use crate::client::{Client, Payload, RequestOptions, RequestResult, create_client};
    pub use crate::config::{ClientConfig, Config, ConfigBuilder};
    pub use crate::error::{ClientError, Result};
    pub use crate::execution::http::{
        HeaderOverrides, HttpTransport, ReqwestTransport, TransportRequest, TransportResponse,
    };
    pub use crate::execution::transformers::ResponseTransformer;
    pub use crate::serialization::{
        ArrayStyle, BodySerializer, FormDataBodySerializer, JsonBodySerializer, ObjectStyle,
        QuerySerializer, QuerySerializerOptions, UrlSearchParamsBodySerializer,
    };
    pub use crate::types::{Blob, Credentials, FormData, ParseAs, RequestBody, ResponseData};
    pub use reqwest::Method;
    pub use tokio_util::sync::CancellationToken;
}
