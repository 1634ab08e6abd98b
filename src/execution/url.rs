//! URL assembly: base URL, path template, and query string.

use crate::error::Result;
use crate::serialization::{PathParams, QueryParams, QuerySerializer, serialize_path};

/// Inputs for [`get_url`].
#[derive(Debug, Clone, Copy)]
pub struct UrlParts<'a> {
    pub base_url: &'a str,
    /// Path template, e.g. `/pets/{petId}`.
    pub url: &'a str,
    pub path: Option<&'a PathParams>,
    pub query: Option<&'a QueryParams>,
    pub query_serializer: &'a QuerySerializer,
}

/// Build the final request URL.
///
/// Fails with `MissingPathParam` when a placeholder has no value. An absolute
/// `url` (`http://` or `https://`) is used as-is instead of being joined to
/// `base_url`.
pub fn get_url(parts: UrlParts<'_>) -> Result<String> {
    let empty = PathParams::new();
    let path = serialize_path(parts.url, parts.path.unwrap_or(&empty))?;

    let mut url = if is_absolute(&path) {
        path
    } else {
        join(parts.base_url, &path)
    };

    if let Some(query) = parts.query {
        let search = parts.query_serializer.serialize(query);
        let search = search.strip_prefix('?').unwrap_or(&search);
        if !search.is_empty() {
            url.push('?');
            url.push_str(search);
        }
    }
    Ok(url)
}

fn is_absolute(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Join with exactly one `/` between base and path.
fn join(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_string();
    }
    if path.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::serialization::QuerySerializerOptions;
    use serde_json::{Value, json};

    fn map(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn build(base_url: &str, url: &str, path: Value, query: Value) -> Result<String> {
        let path = map(path);
        let query = map(query);
        let serializer = QuerySerializer::default();
        get_url(UrlParts {
            base_url,
            url,
            path: Some(&path),
            query: Some(&query),
            query_serializer: &serializer,
        })
    }

    #[test]
    fn joins_base_and_path_without_trailing_question_mark() {
        assert_eq!(build("https://a", "/pets", json!({}), json!({})).unwrap(), "https://a/pets");
    }

    #[test]
    fn slash_is_never_duplicated_or_missing() {
        assert_eq!(build("https://a/", "/pets", json!({}), json!({})).unwrap(), "https://a/pets");
        assert_eq!(build("https://a", "pets", json!({}), json!({})).unwrap(), "https://a/pets");
        assert_eq!(build("", "/pets", json!({}), json!({})).unwrap(), "/pets");
        assert_eq!(build("https://a", "", json!({}), json!({})).unwrap(), "https://a");
    }

    #[test]
    fn substitutes_path_and_appends_query() {
        let url = build(
            "https://a/v1",
            "/pets/{petId}",
            json!({"petId": 42}),
            json!({"limit": 10, "tags": ["x", "y"]}),
        )
        .unwrap();
        assert_eq!(url, "https://a/v1/pets/42?limit=10&tags=x&tags=y");
    }

    #[test]
    fn missing_path_param_fails() {
        let err = build("https://a", "/pets/{petId}", json!({}), json!({})).unwrap_err();
        assert!(matches!(err, ClientError::MissingPathParam(_)));
    }

    #[test]
    fn absolute_url_ignores_base() {
        assert_eq!(
            build("https://a", "https://b/pets", json!({}), json!({})).unwrap(),
            "https://b/pets"
        );
    }

    #[test]
    fn absolute_url_scheme_is_case_insensitive() {
        assert_eq!(
            build("https://a", "HTTPS://b/pets", json!({}), json!({})).unwrap(),
            "HTTPS://b/pets"
        );
        assert_eq!(
            build("https://a", "Http://b", json!({}), json!({})).unwrap(),
            "Http://b"
        );
        assert_eq!(
            build("https://a", "/httpsx", json!({}), json!({})).unwrap(),
            "https://a/httpsx"
        );
    }

    #[test]
    fn custom_serializer_leading_question_mark_is_stripped() {
        let serializer = QuerySerializer::custom(|_| "?x=1".to_string());
        let query = map(json!({"ignored": true}));
        let url = get_url(UrlParts {
            base_url: "https://a",
            url: "/pets",
            path: None,
            query: Some(&query),
            query_serializer: &serializer,
        })
        .unwrap();
        assert_eq!(url, "https://a/pets?x=1");
    }

    #[test]
    fn options_serializer_is_honoured() {
        let serializer: QuerySerializer = QuerySerializerOptions::new()
            .with_array(false, crate::serialization::ArrayStyle::Form)
            .into();
        let query = map(json!({"ids": [1, 2]}));
        let url = get_url(UrlParts {
            base_url: "",
            url: "/pets",
            path: None,
            query: Some(&query),
            query_serializer: &serializer,
        })
        .unwrap();
        assert_eq!(url, "/pets?ids=1,2");
    }
}
