//! Response transformers.
//!
//! A transformer post-processes decoded JSON payloads on the success path,
//! e.g. to convert date strings or rename fields. It never sees error bodies
//! or non-JSON payloads.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ResponseTransformer: Send + Sync {
    async fn transform(&self, data: Value) -> Result<Value>;
}

/// Synchronous closures are transformers.
#[async_trait]
impl<F> ResponseTransformer for F
where
    F: Fn(Value) -> Result<Value> + Send + Sync,
{
    async fn transform(&self, data: Value) -> Result<Value> {
        self(data)
    }
}
