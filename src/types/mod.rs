//! Core data types shared across the request pipeline.

pub mod body;
pub mod http;
pub mod response;

pub use body::{Blob, FormData, FormValue, HttpBody, RequestBody};
pub use http::{Credentials, ParseAs};
pub use response::{ByteStream, ResponseBody, ResponseData};
