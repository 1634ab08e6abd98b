//! Per-method shorthands. Each overrides `options.method`.

use super::{Client, RequestOptions, RequestResult};
use crate::error::Result;
use reqwest::Method;

macro_rules! verbs {
    ($($(#[$doc:meta])* $name:ident => $method:expr;)*) => {
        impl Client {
            $(
                $(#[$doc])*
                pub async fn $name(&self, options: RequestOptions) -> Result<RequestResult> {
                    self.request(options.method($method)).await
                }
            )*
        }
    };
}

verbs! {
    /// `GET` request.
    get => Method::GET;
    /// `POST` request.
    post => Method::POST;
    /// `PUT` request.
    put => Method::PUT;
    /// `PATCH` request.
    patch => Method::PATCH;
    /// `DELETE` request.
    delete => Method::DELETE;
    /// `HEAD` request.
    head => Method::HEAD;
    /// `OPTIONS` request.
    options => Method::OPTIONS;
    /// `TRACE` request.
    trace => Method::TRACE;
    /// `CONNECT` request.
    connect => Method::CONNECT;
}
