//! Default values used when building a client configuration.

/// Environment variable that seeds the default base URL.
pub const BASE_URL_ENV: &str = "API_FETCH_CLIENT_BASE_URL";

/// `Content-Type` sent by default. Removed automatically for requests
/// without a body.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// `User-Agent` of the default reqwest transport.
pub const USER_AGENT: &str = concat!("api-fetch-client/", env!("CARGO_PKG_VERSION"));

/// Base URL from [`BASE_URL_ENV`], or empty when unset.
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_default()
}
