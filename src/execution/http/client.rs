//! Default transport backed by `reqwest`.

use super::transport::{HttpTransport, TransportRequest, TransportResponse};
use crate::error::{ClientError, Result};
use crate::types::{ByteStream, Credentials, FormData, FormValue, HttpBody, ResponseBody};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap};
use reqwest::multipart::{Form, Part};
use tokio_util::sync::CancellationToken;

/// [`HttpTransport`] that sends requests with a `reqwest::Client`.
///
/// - `credentials: omit` strips `Cookie` and `Authorization` before sending.
/// - Form-data bodies are sent as multipart; any inherited `Content-Type` is
///   dropped so the boundary header generated by reqwest is used.
/// - The cancellation token aborts both the exchange and later body reads.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(crate::defaults::USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let TransportRequest {
            method,
            url,
            mut headers,
            body,
            credentials,
            signal,
        } = request;

        strip_credentials(&mut headers, credentials);

        let mut rb = self.client.request(method, &url);
        match body {
            Some(HttpBody::Text(text)) => rb = rb.headers(headers).body(text),
            Some(HttpBody::Bytes(bytes)) => rb = rb.headers(headers).body(bytes),
            Some(HttpBody::FormData(form)) => {
                headers.remove(CONTENT_TYPE);
                rb = rb.headers(headers).multipart(to_multipart(form)?);
            }
            None => rb = rb.headers(headers),
        }

        let response = match &signal {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ClientError::Aborted),
                response = rb.send() => response?,
            },
            None => rb.send().await?,
        };

        let status = response.status();
        let headers = response.headers().clone();
        let stream: ByteStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map_err(ClientError::from)),
        );
        let stream = match signal {
            Some(token) => cancellable(stream, token),
            None => stream,
        };

        Ok(TransportResponse::new(
            status,
            headers,
            ResponseBody::from_stream(stream),
        ))
    }
}

fn strip_credentials(headers: &mut HeaderMap, credentials: Option<Credentials>) {
    if credentials == Some(Credentials::Omit) {
        headers.remove(COOKIE);
        headers.remove(AUTHORIZATION);
    }
}

/// End the body stream with `Aborted` once `token` fires.
fn cancellable(stream: ByteStream, token: CancellationToken) -> ByteStream {
    Box::pin(futures::stream::unfold(
        Some((stream, token)),
        |state| async move {
            let (mut stream, token) = state?;
            tokio::select! {
                biased;
                _ = token.cancelled() => Some((Err(ClientError::Aborted), None)),
                item = stream.next() => item.map(|item| (item, Some((stream, token)))),
            }
        },
    ))
}

fn to_multipart(form: FormData) -> Result<Form> {
    let mut out = Form::new();
    for (name, value) in form {
        out = match value {
            FormValue::Text(text) => out.text(name, text),
            FormValue::File { blob, filename } => {
                let mut part = Part::bytes(blob.bytes.to_vec());
                if let Some(filename) = filename {
                    part = part.file_name(filename);
                }
                if let Some(content_type) = blob.content_type {
                    part = part
                        .mime_str(&content_type)
                        .map_err(|e| ClientError::Serialization(e.to_string()))?;
                }
                out.part(name, part)
            }
        };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Blob;
    use bytes::Bytes;
    use reqwest::header::HeaderValue;

    #[test]
    fn omit_credentials_strips_cookie_and_authorization() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sid=1"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert("x-keep", HeaderValue::from_static("1"));

        strip_credentials(&mut headers, Some(Credentials::Include));
        assert_eq!(headers.len(), 3);

        strip_credentials(&mut headers, Some(Credentials::Omit));
        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key("x-keep"));
    }

    #[test]
    fn multipart_conversion_rejects_invalid_mime() {
        let mut form = FormData::new();
        form.append_file("f", Blob::new(Bytes::from_static(b"x"), Some("not a mime".into())), None);
        assert!(matches!(to_multipart(form), Err(ClientError::Serialization(_))));
    }

    #[tokio::test]
    async fn cancelled_token_ends_body_with_abort() {
        let token = CancellationToken::new();
        let pending: ByteStream = Box::pin(futures::stream::pending());
        let mut stream = cancellable(pending, token.clone());
        token.cancel();
        let first = stream.next().await;
        assert!(matches!(first, Some(Err(ClientError::Aborted))));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn cancellable_passes_chunks_through() {
        let token = CancellationToken::new();
        let chunks: ByteStream = Box::pin(futures::stream::iter(vec![Ok(Bytes::from_static(
            b"ok",
        ))]));
        let body = ResponseBody::from_stream(cancellable(chunks, token));
        assert_eq!(body.text().await.unwrap(), "ok");
    }
}
