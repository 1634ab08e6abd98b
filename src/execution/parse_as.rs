//! Content-type based selection of the response decoding strategy.

use crate::types::ParseAs;

/// Pick a decoding strategy from a `Content-Type` header value.
///
/// Never returns `Auto` or `Stream`; unknown or missing types decode as a blob.
pub fn get_parse_as(content_type: Option<&str>) -> ParseAs {
    let Some(content_type) = content_type else {
        return ParseAs::Blob;
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if media_type.starts_with("application/json") || media_type.ends_with("+json") {
        ParseAs::Json
    } else if media_type.starts_with("text/") {
        ParseAs::Text
    } else if media_type == "multipart/form-data" {
        ParseAs::FormData
    } else {
        ParseAs::Blob
    }
}

/// Effective strategy: an explicit choice wins, `Auto` consults the header.
pub fn resolve_parse_as(requested: ParseAs, content_type: Option<&str>) -> ParseAs {
    match requested {
        ParseAs::Auto => get_parse_as(content_type),
        explicit => explicit,
    }
}
