//! Request execution: URL assembly, dispatch, and response decoding.

pub mod http;
pub mod orchestrator;
pub mod parse_as;
pub mod transformers;
pub mod url;

pub use orchestrator::{ErrorMode, execute};
pub use parse_as::{get_parse_as, resolve_parse_as};
pub use transformers::ResponseTransformer;
pub use url::{UrlParts, get_url};
