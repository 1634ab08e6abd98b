//! Query string serialization.
//!
//! Parameters are serialized in insertion order (`serde_json` is built with
//! `preserve_order`), which keeps generated URLs reproducible.
//!
//! | value  | style / explode          | output              |
//! |--------|--------------------------|---------------------|
//! | array  | any / `true`             | `k=1&k=2`           |
//! | array  | `form` / `false`         | `k=1,2`             |
//! | array  | `pipeDelimited` / false  | `k=1\|2`            |
//! | object | `deepObject`             | `k[a]=1&k[b]=2`     |
//! | object | `form` / `true`          | `a=1&b=2`           |
//! | object | `form` / `false`         | `k=a,1,b,2`         |
//! | object | `dot`                    | `k.a=1&k.b=2`       |
//! | object | `json`                   | `k=%7B%22a%22...`   |

use super::encoding::{encode_component, encode_value, value_to_string};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Query parameter mapping, in insertion order.
pub type QueryParams = Map<String, Value>;

/// How array values are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayStyle {
    #[default]
    Form,
    SpaceDelimited,
    PipeDelimited,
}

impl ArrayStyle {
    /// Separator used when the array is not exploded (already encoded).
    pub fn separator(&self) -> &'static str {
        match self {
            ArrayStyle::Form => ",",
            ArrayStyle::SpaceDelimited => "%20",
            ArrayStyle::PipeDelimited => "|",
        }
    }
}

/// How object values are flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectStyle {
    #[default]
    DeepObject,
    Form,
    Dot,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayOptions {
    pub explode: bool,
    pub style: ArrayStyle,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            explode: true,
            style: ArrayStyle::Form,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectOptions {
    pub explode: bool,
    pub style: ObjectStyle,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            explode: true,
            style: ObjectStyle::DeepObject,
        }
    }
}

/// Per-parameter overrides; unset fields fall back to the serializer defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterOptions {
    pub allow_reserved: Option<bool>,
    pub array: Option<ArrayOptions>,
    pub object: Option<ObjectOptions>,
}

/// Options for the built-in query serializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuerySerializerOptions {
    /// Keep RFC 3986 reserved characters unencoded in values.
    pub allow_reserved: bool,
    pub array: ArrayOptions,
    pub object: ObjectOptions,
    /// Overrides keyed by parameter name.
    pub parameters: HashMap<String, ParameterOptions>,
}

impl QuerySerializerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_reserved(mut self, allow_reserved: bool) -> Self {
        self.allow_reserved = allow_reserved;
        self
    }

    pub fn with_array(mut self, explode: bool, style: ArrayStyle) -> Self {
        self.array = ArrayOptions { explode, style };
        self
    }

    pub fn with_object(mut self, explode: bool, style: ObjectStyle) -> Self {
        self.object = ObjectOptions { explode, style };
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, options: ParameterOptions) -> Self {
        self.parameters.insert(name.into(), options);
        self
    }

    /// Serialize `params` into a query string without the leading `?`.
    pub fn serialize(&self, params: &QueryParams) -> String {
        let mut parts = Vec::new();
        for (name, value) in params {
            let overrides = self.parameters.get(name);
            let allow_reserved = overrides
                .and_then(|p| p.allow_reserved)
                .unwrap_or(self.allow_reserved);
            let array = overrides.and_then(|p| p.array).unwrap_or(self.array);
            let object = overrides.and_then(|p| p.object).unwrap_or(self.object);
            let name = &encode_component(name);

            match value {
                Value::Null => {}
                Value::Array(items) => {
                    serialize_array(&mut parts, name, items, array, allow_reserved);
                }
                Value::Object(map) => {
                    serialize_object(&mut parts, name, map, object, array, allow_reserved);
                }
                primitive => parts.push(pair(name, primitive, allow_reserved)),
            }
        }
        parts.join("&")
    }
}

/// Signature of a caller-supplied query serializer.
pub type QuerySerializerFn = Arc<dyn Fn(&QueryParams) -> String + Send + Sync>;

/// Either the built-in serializer with options, or a custom function.
#[derive(Clone)]
pub enum QuerySerializer {
    Options(QuerySerializerOptions),
    Custom(QuerySerializerFn),
}

impl QuerySerializer {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&QueryParams) -> String + Send + Sync + 'static,
    {
        QuerySerializer::Custom(Arc::new(f))
    }

    pub fn serialize(&self, params: &QueryParams) -> String {
        match self {
            QuerySerializer::Options(options) => options.serialize(params),
            QuerySerializer::Custom(f) => f(params),
        }
    }
}

impl Default for QuerySerializer {
    fn default() -> Self {
        QuerySerializer::Options(QuerySerializerOptions::default())
    }
}

impl From<QuerySerializerOptions> for QuerySerializer {
    fn from(options: QuerySerializerOptions) -> Self {
        QuerySerializer::Options(options)
    }
}

impl std::fmt::Debug for QuerySerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuerySerializer::Options(options) => f.debug_tuple("Options").field(options).finish(),
            QuerySerializer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Build a query serializer function from options.
pub fn create_query_serializer(
    options: QuerySerializerOptions,
) -> impl Fn(&QueryParams) -> String + Send + Sync {
    move |params| options.serialize(params)
}

fn pair(name: &str, value: &Value, allow_reserved: bool) -> String {
    format!(
        "{}={}",
        name,
        encode_value(&value_to_string(value), allow_reserved)
    )
}

fn serialize_array(
    parts: &mut Vec<String>,
    name: &str,
    items: &[Value],
    options: ArrayOptions,
    allow_reserved: bool,
) {
    let items: Vec<&Value> = items.iter().filter(|v| !v.is_null()).collect();
    if items.is_empty() {
        return;
    }
    if options.explode {
        parts.extend(items.into_iter().map(|v| pair(name, v, allow_reserved)));
    } else {
        let joined = items
            .into_iter()
            .map(|v| encode_value(&value_to_string(v), allow_reserved))
            .collect::<Vec<_>>()
            .join(options.style.separator());
        parts.push(format!("{name}={joined}"));
    }
}

fn serialize_object(
    parts: &mut Vec<String>,
    name: &str,
    map: &Map<String, Value>,
    options: ObjectOptions,
    array: ArrayOptions,
    allow_reserved: bool,
) {
    match options.style {
        ObjectStyle::DeepObject => {
            flatten(parts, name, map, array, allow_reserved, |prefix, key| {
                format!("{prefix}[{key}]")
            })
        }
        ObjectStyle::Dot => flatten(parts, name, map, array, allow_reserved, |prefix, key| {
            format!("{prefix}.{key}")
        }),
        ObjectStyle::Form if options.explode => {
            for (key, value) in map {
                if !value.is_null() {
                    parts.push(pair(&encode_component(key), value, allow_reserved));
                }
            }
        }
        ObjectStyle::Form => {
            let joined = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .flat_map(|(k, v)| {
                    [
                        encode_component(k),
                        encode_value(&value_to_string(v), allow_reserved),
                    ]
                })
                .collect::<Vec<_>>()
                .join(",");
            if !joined.is_empty() {
                parts.push(format!("{name}={joined}"));
            }
        }
        ObjectStyle::Json => {
            parts.push(format!(
                "{}={}",
                name,
                encode_component(&Value::Object(map.clone()).to_string())
            ));
        }
    }
}

/// Flatten nested objects into `prefix<join>key` names; arrays inside follow `array`.
fn flatten(
    parts: &mut Vec<String>,
    prefix: &str,
    map: &Map<String, Value>,
    array: ArrayOptions,
    allow_reserved: bool,
    join: fn(&str, &str) -> String,
) {
    for (key, value) in map {
        let name = join(prefix, &encode_component(key));
        match value {
            Value::Null => {}
            Value::Object(inner) => flatten(parts, &name, inner, array, allow_reserved, join),
            Value::Array(items) => serialize_array(parts, &name, items, array, allow_reserved),
            primitive => parts.push(pair(&name, primitive, allow_reserved)),
        }
    }
}
