use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reader_client::{ApiError, ApiTransport, ClientConfig, RawBody, RequestOptions};

fn transport_for(server: &MockServer) -> ApiTransport {
    ApiTransport::new(&ClientConfig::new(server.uri()))
}

#[tokio::test]
async fn json_bodies_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"ID": 1}])))
        .mount(&server)
        .await;

    let body = transport_for(&server).get("/articles").await.unwrap();
    assert_eq!(body, RawBody::Json(json!([{"ID": 1}])));
}

#[tokio::test]
async fn empty_bodies_become_empty_not_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let body = transport_for(&server).delete("/rss?id=1").await.unwrap();
    assert_eq!(body, RawBody::Empty);
}

#[tokio::test]
async fn non_json_bodies_pass_through_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/articles/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Article 7 deleted successfully"))
        .mount(&server)
        .await;

    let body = transport_for(&server)
        .delete("/articles/delete?id=7")
        .await
        .unwrap();
    assert_eq!(
        body,
        RawBody::Text("Article 7 deleted successfully".to_string())
    );
}

#[tokio::test]
async fn non_success_status_becomes_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = transport_for(&server).get("/rss").await.unwrap_err();
    match err {
        ApiError::Status { status, reason } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn json_content_type_is_sent_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    transport_for(&server).get("/rss").await.unwrap();
}

#[tokio::test]
async fn caller_headers_override_the_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rss"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions {
        method: Method::POST,
        headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        body: None,
    };
    transport_for(&server).request("/rss", options).await.unwrap();
}

#[tokio::test]
async fn malformed_shapes_become_typed_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "an array"})))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .get_json::<Vec<reader_client::Article>>("/articles")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
}
