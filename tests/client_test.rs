//! Request pipeline tests against an in-memory transport.

mod support;

use api_fetch_client::prelude::*;
use api_fetch_client::types::HttpBody;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use support::{CannedResponse, FailingTransport, RecordingTransport};

fn client_with(transport: &RecordingTransport) -> Client {
    create_client(
        Config::builder()
            .base_url("https://api.example.com/v1/")
            .transport(transport.clone()),
    )
    .unwrap()
}

#[tokio::test]
async fn status_204_yields_empty_object() {
    let transport = RecordingTransport::new(
        CannedResponse::new(204).header("content-type", "application/json"),
    );
    let client = client_with(&transport);

    let result = client.delete(RequestOptions::new("/pets/1")).await.unwrap();

    assert_eq!(result.data().and_then(|d| d.as_json()), Some(&json!({})));
    assert!(result.error().is_none());
}

#[tokio::test]
async fn zero_content_length_yields_empty_object() {
    let transport = RecordingTransport::new(
        CannedResponse::new(200)
            .header("content-type", "text/plain")
            .header("content-length", "0"),
    );
    let client = client_with(&transport);

    let result = client.get(RequestOptions::new("/pets")).await.unwrap();
    assert_eq!(result.data().and_then(|d| d.as_json()), Some(&json!({})));
}

#[tokio::test]
async fn non_json_error_body_is_kept_as_text() {
    let transport = RecordingTransport::new(CannedResponse::text(500, "not json"));
    let client = client_with(&transport);

    let result = client.get(RequestOptions::new("/pets")).await.unwrap();

    assert!(result.data().is_none());
    assert_eq!(result.error(), Some(&json!("not json")));
    assert_eq!(result.response.status.as_u16(), 500);
}

#[tokio::test]
async fn empty_error_body_becomes_empty_object() {
    let transport = RecordingTransport::new(CannedResponse::new(404));
    let client = client_with(&transport);

    let result = client.get(RequestOptions::new("/pets/9")).await.unwrap();
    assert_eq!(result.error(), Some(&json!({})));
}

#[tokio::test]
async fn throw_on_error_raises_parsed_error_body() {
    let transport = RecordingTransport::new(CannedResponse::json(400, r#"{"code":1}"#));
    let client = client_with(&transport);

    let err = client
        .get(RequestOptions::new("/pets").throw_on_error(true))
        .await
        .unwrap_err();

    match err {
        ClientError::ErrorResponse { status, error } => {
            assert_eq!(status, 400);
            assert_eq!(error, json!({"code": 1}));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn absent_body_removes_inherited_content_type() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = client_with(&transport);

    client.get(RequestOptions::new("/pets")).await.unwrap();
    let sent = transport.last();
    assert!(sent.headers.get(CONTENT_TYPE).is_none());
    assert!(sent.body.is_none());

    client
        .post(RequestOptions::new("/pets").body(Value::Null))
        .await
        .unwrap();
    assert!(transport.last().headers.get(CONTENT_TYPE).is_none());

    // the client default is untouched
    assert!(client.get_config().headers.get(CONTENT_TYPE).is_some());
}

#[tokio::test]
async fn structured_body_is_json_encoded_with_content_type() {
    let transport = RecordingTransport::new(CannedResponse::json(201, r#"{"id":1}"#));
    let client = client_with(&transport);

    let result = client
        .post(RequestOptions::new("/pets").body(json!({"name": "rex"})))
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(sent.body, Some(HttpBody::Text(r#"{"name":"rex"}"#.into())));
    assert_eq!(result.data().and_then(|d| d.as_json()), Some(&json!({"id": 1})));
}

#[tokio::test]
async fn url_combines_base_path_params_and_query() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "[]"));
    let client = client_with(&transport);

    client
        .get(
            RequestOptions::new("/pets/{petId}/toys")
                .path_param("petId", 42)
                .query_param("limit", 10)
                .query_param("tags", json!(["a", "b"]))
                .query_param("skip", Value::Null),
        )
        .await
        .unwrap();

    assert_eq!(
        transport.last().url,
        "https://api.example.com/v1/pets/42/toys?limit=10&tags=a&tags=b"
    );
}

#[tokio::test]
async fn missing_path_param_fails_before_dispatch() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = client_with(&transport);

    let err = client
        .get(RequestOptions::new("/pets/{petId}"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MissingPathParam(ref name) if name == "petId"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn response_transformer_applies_to_json_only() {
    let transformer = |mut value: Value| -> api_fetch_client::Result<Value> {
        if let Some(obj) = value.as_object_mut() {
            obj.insert("transformed".into(), json!(true));
        }
        Ok(value)
    };

    let json_transport = RecordingTransport::new(CannedResponse::json(200, r#"{"a":1}"#));
    let client = client_with(&json_transport);
    let result = client
        .get(RequestOptions::new("/a").response_transformer(transformer))
        .await
        .unwrap();
    assert_eq!(
        result.data().and_then(|d| d.as_json()),
        Some(&json!({"a": 1, "transformed": true}))
    );

    let text_transport = RecordingTransport::new(CannedResponse::text(200, r#"{"a":1}"#));
    let client = client_with(&text_transport);
    let result = client
        .get(RequestOptions::new("/a").response_transformer(transformer))
        .await
        .unwrap();
    assert_eq!(result.data().and_then(|d| d.as_text()), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn explicit_parse_as_overrides_content_type() {
    let transport = RecordingTransport::new(CannedResponse::json(200, r#"{"a":1}"#));
    let client = client_with(&transport);

    let result = client
        .get(RequestOptions::new("/a").parse_as(ParseAs::Text))
        .await
        .unwrap();
    assert_eq!(result.data().and_then(|d| d.as_text()), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn unknown_content_type_is_read_as_blob() {
    let transport = RecordingTransport::new(
        CannedResponse::new(200)
            .header("content-type", "image/png")
            .body("PNG"),
    );
    let client = client_with(&transport);

    let result = client.get(RequestOptions::new("/img")).await.unwrap();
    let blob = result.data().and_then(|d| d.as_blob()).unwrap();
    assert_eq!(&blob.bytes[..], b"PNG");
    assert_eq!(blob.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn stream_returns_raw_body() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "data: 1\n\n"));
    let client = client_with(&transport);

    let result = client
        .get(RequestOptions::new("/events").parse_as(ParseAs::Stream))
        .await
        .unwrap();
    let mut stream = result.into_data().and_then(|d| d.into_stream()).unwrap();
    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, b"data: 1\n\n");
}

#[tokio::test]
async fn invalid_json_success_body_is_a_decode_error() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{oops"));
    let client = client_with(&transport);

    let err = client.get(RequestOptions::new("/a")).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn per_call_headers_override_without_mutating_defaults() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = create_client(
        Config::builder()
            .transport(transport.clone())
            .header("X-Client", "base")
            .header("X-Drop", "1"),
    )
    .unwrap();

    client
        .get(
            RequestOptions::new("/a")
                .header("x-client", "call")
                .remove_header("X-Drop")
                .header_values("Accept", ["application/json", "text/plain"]),
        )
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.headers.get("x-client").unwrap(), "call");
    assert!(sent.headers.get("x-drop").is_none());
    assert_eq!(sent.headers.get_all("accept").iter().count(), 2);

    let config = client.get_config();
    assert_eq!(config.headers.get("x-client").unwrap(), "base");
    assert!(config.headers.get("x-drop").is_some());
}

#[tokio::test]
async fn set_config_applies_to_later_requests_only() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = client_with(&transport);
    let before = client.get_config();

    let updated = client
        .set_config(Config::builder().base_url("https://other.example.com"))
        .unwrap();
    client.get(RequestOptions::new("/a")).await.unwrap();

    assert_eq!(before.base_url, "https://api.example.com/v1");
    assert_eq!(updated.base_url, "https://other.example.com");
    assert_eq!(transport.last().url, "https://other.example.com/a");

    // clones share configuration
    let clone = client.clone();
    clone.set_config(Config::builder().throw_on_error(true)).unwrap();
    assert!(client.get_config().throw_on_error);
}

#[tokio::test]
async fn verbs_set_the_request_method() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = client_with(&transport);
    let opts = || RequestOptions::new("/a");

    client.get(opts()).await.unwrap();
    client.post(opts()).await.unwrap();
    client.put(opts()).await.unwrap();
    client.patch(opts()).await.unwrap();
    client.delete(opts()).await.unwrap();
    client.head(opts()).await.unwrap();
    client.options(opts()).await.unwrap();
    client.trace(opts()).await.unwrap();
    client.connect(opts()).await.unwrap();
    client
        .request(opts().method(Method::from_bytes(b"PURGE").unwrap()))
        .await
        .unwrap();

    let methods: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.method.to_string())
        .collect();
    assert_eq!(
        methods,
        vec![
            "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE", "CONNECT",
            "PURGE"
        ]
    );
}

#[tokio::test]
async fn transport_errors_propagate_unchanged() {
    let client = create_client(
        Config::builder().transport(FailingTransport(ClientError::Aborted)),
    )
    .unwrap();

    let err = client.get(RequestOptions::new("/a")).await.unwrap_err();
    assert!(matches!(err, ClientError::Aborted));
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn credentials_and_signal_reach_the_transport() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = create_client(
        Config::builder()
            .transport(transport.clone())
            .credentials(Credentials::Include),
    )
    .unwrap();
    let token = CancellationToken::new();

    client
        .get(RequestOptions::new("/a").signal(token.clone()))
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.credentials, Some(Credentials::Include));
    assert!(sent.signal.is_some());
}

#[tokio::test]
async fn url_search_params_serializer_encodes_body() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = client_with(&transport);

    client
        .post(
            RequestOptions::new("/login")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body_serializer(UrlSearchParamsBodySerializer)
                .body(json!({"user": "a b", "scope": ["x", "y"]})),
        )
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(
        sent.body,
        Some(HttpBody::Text("user=a+b&scope=x&scope=y".into()))
    );
    assert_eq!(
        sent.headers.get(CONTENT_TYPE).unwrap(),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn custom_query_serializer_is_used() {
    let transport = RecordingTransport::new(CannedResponse::json(200, "{}"));
    let client = create_client(
        Config::builder()
            .transport(transport.clone())
            .query_serializer(
                QuerySerializerOptions::new().with_array(false, ArrayStyle::PipeDelimited),
            ),
    )
    .unwrap();

    client
        .get(RequestOptions::new("https://b.example.com/x").query_param("ids", json!([1, 2])))
        .await
        .unwrap();
    assert_eq!(transport.last().url, "https://b.example.com/x?ids=1|2");
}
