//! Request serialization
//!
//! Converts structured request parts into their wire form:
//! - Query strings (`query`)
//! - Path template substitution (`path`)
//! - Request bodies (`body`)
//! - Form-data encoding and decoding (`form_data`)

pub mod body;
pub mod encoding;
pub mod form_data;
pub mod path;
pub mod query;

pub use body::{
    BodySerializer, FormDataBodySerializer, JsonBodySerializer, UrlSearchParamsBodySerializer,
};
pub use path::{PathParams, serialize_path};
pub use query::{
    ArrayOptions, ArrayStyle, ObjectOptions, ObjectStyle, ParameterOptions, QueryParams,
    QuerySerializer, QuerySerializerOptions, create_query_serializer,
};
