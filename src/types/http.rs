//! HTTP option enums.
//!
//! These are plain configuration values and derive `serde` so that client
//! configuration can be loaded from data files alongside query options.

use serde::{Deserialize, Serialize};

/// Credential mode forwarded to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Credentials {
    /// Always send ambient credentials (cookies, authorization).
    Include,
    /// Never send ambient credentials.
    Omit,
    /// Send credentials only to the origin of the base URL.
    SameOrigin,
}

/// How a successful response body is decoded.
///
/// `Auto` defers to the response `Content-Type` (see
/// [`get_parse_as`](crate::execution::parse_as::get_parse_as)); every other
/// variant is an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseAs {
    #[default]
    Auto,
    Json,
    Text,
    Blob,
    ArrayBuffer,
    FormData,
    /// Skip decoding and hand back the unconsumed body stream.
    Stream,
}

impl ParseAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseAs::Auto => "auto",
            ParseAs::Json => "json",
            ParseAs::Text => "text",
            ParseAs::Blob => "blob",
            ParseAs::ArrayBuffer => "arrayBuffer",
            ParseAs::FormData => "formData",
            ParseAs::Stream => "stream",
        }
    }
}

impl std::fmt::Display for ParseAs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
