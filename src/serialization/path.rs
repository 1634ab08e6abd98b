//! Path template substitution.
//!
//! Supports the OpenAPI path parameter styles:
//! - `{id}` simple, `{id*}` simple exploded
//! - `{.id}` label, `{.id*}` label exploded
//! - `{;id}` matrix, `{;id*}` matrix exploded

use super::encoding::{encode_component, value_to_string};
use crate::error::{ClientError, Result};
use serde_json::{Map, Value};

/// Path parameter mapping (placeholder name -> value).
pub type PathParams = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathStyle {
    Simple,
    Label,
    Matrix,
}

#[derive(Debug, PartialEq, Eq)]
struct Placeholder<'a> {
    name: &'a str,
    style: PathStyle,
    explode: bool,
}

impl<'a> Placeholder<'a> {
    fn parse(token: &'a str) -> Self {
        let (style, rest) = match token.as_bytes().first() {
            Some(b'.') => (PathStyle::Label, &token[1..]),
            Some(b';') => (PathStyle::Matrix, &token[1..]),
            _ => (PathStyle::Simple, token),
        };
        let (name, explode) = match rest.strip_suffix('*') {
            Some(name) => (name, true),
            None => (rest, false),
        };
        Self {
            name,
            style,
            explode,
        }
    }

    fn render(&self, value: &Value) -> String {
        match value {
            Value::Array(items) => self.render_array(items),
            Value::Object(map) => self.render_object(map),
            primitive => {
                let encoded = encode_component(&value_to_string(primitive));
                match self.style {
                    PathStyle::Simple => encoded,
                    PathStyle::Label => format!(".{encoded}"),
                    PathStyle::Matrix => format!(";{}={encoded}", self.name),
                }
            }
        }
    }

    fn render_array(&self, items: &[Value]) -> String {
        let encoded: Vec<String> = items
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| encode_component(&value_to_string(v)))
            .collect();
        match (self.style, self.explode) {
            (PathStyle::Simple, _) => encoded.join(","),
            (PathStyle::Label, false) => format!(".{}", encoded.join(",")),
            (PathStyle::Label, true) => format!(".{}", encoded.join(".")),
            (PathStyle::Matrix, false) => format!(";{}={}", self.name, encoded.join(",")),
            (PathStyle::Matrix, true) => encoded
                .iter()
                .map(|v| format!(";{}={v}", self.name))
                .collect(),
        }
    }

    fn render_object(&self, map: &Map<String, Value>) -> String {
        let entries: Vec<(String, String)> = map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (encode_component(k), encode_component(&value_to_string(v))))
            .collect();
        if self.explode {
            let pairs = entries.iter().map(|(k, v)| format!("{k}={v}"));
            match self.style {
                PathStyle::Simple => pairs.collect::<Vec<_>>().join(","),
                PathStyle::Label => pairs.map(|p| format!(".{p}")).collect(),
                PathStyle::Matrix => pairs.map(|p| format!(";{p}")).collect(),
            }
        } else {
            let flat = entries
                .iter()
                .flat_map(|(k, v)| [k.as_str(), v.as_str()])
                .collect::<Vec<_>>()
                .join(",");
            match self.style {
                PathStyle::Simple => flat,
                PathStyle::Label => format!(".{flat}"),
                PathStyle::Matrix => format!(";{}={flat}", self.name),
            }
        }
    }
}

/// Substitute every `{placeholder}` in `template` from `params`.
///
/// A placeholder without a value (absent or `null`) fails with
/// [`ClientError::MissingPathParam`]. Text outside braces is copied verbatim,
/// as is an unterminated `{`.
pub fn serialize_path(template: &str, params: &PathParams) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        out.push_str(&rest[..open]);

        let placeholder = Placeholder::parse(&rest[open + 1..close]);
        match params.get(placeholder.name) {
            Some(value) if !value.is_null() => out.push_str(&placeholder.render(value)),
            _ => return Err(ClientError::MissingPathParam(placeholder.name.to_string())),
        }
        rest = &rest[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
