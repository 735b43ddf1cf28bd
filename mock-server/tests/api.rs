use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_journal, Journal};
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- text ---

#[tokio::test]
async fn hello_returns_plain_text() {
    let resp = app().oneshot(get("/hello")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"hello");
}

#[tokio::test]
async fn invalid_utf8_returns_raw_bytes() {
    let resp = app().oneshot(get("/bytes/invalid-utf8")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(std::str::from_utf8(&body).is_err());
}

#[tokio::test]
async fn empty_returns_no_bytes() {
    let resp = app().oneshot(get("/empty")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

// --- json ---

#[tokio::test]
async fn json_object_route() {
    let resp = app().oneshot(get("/json/object")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({ "a": 1 }));
}

#[tokio::test]
async fn json_array_route() {
    let resp = app().oneshot(get("/json/array")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([1, 2, 3]));
}

// --- error statuses ---

#[tokio::test]
async fn forbidden_has_exact_body() {
    let resp = app().oneshot(get("/forbidden")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(&body_bytes(resp).await[..], b"forbidden");
}

#[tokio::test]
async fn status_route_uses_requested_code() {
    let resp = app().oneshot(get("/status/503")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(&body_bytes(resp).await[..], b"status 503");
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(get("/status/teapot")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- echo ---

#[tokio::test]
async fn echo_returns_body_and_content_type() {
    let req = Request::builder()
        .method("POST")
        .uri("/echo")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(r#"{"title":"Buy milk"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_json(resp).await["title"], "Buy milk");
}

#[tokio::test]
async fn echo_accepts_put() {
    let req = Request::builder()
        .method("PUT")
        .uri("/echo")
        .body("raw".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/octet-stream"
    );
    assert_eq!(&body_bytes(resp).await[..], b"raw");
}

// --- journal ---

#[tokio::test]
async fn journal_records_requests_but_not_itself() {
    use tower::Service;

    let journal = Journal::default();
    let mut app = app_with_journal(journal.clone()).into_service();

    for uri in ["/hello", "/forbidden", "/requests"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get(uri))
            .await
            .unwrap();
        assert_ne!(resp.status(), StatusCode::NOT_FOUND);
    }

    assert_eq!(
        *journal.read().await,
        vec!["GET /hello".to_string(), "GET /forbidden".to_string()]
    );

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/requests"))
        .await
        .unwrap();
    assert_eq!(
        body_json(resp).await,
        serde_json::json!(["GET /hello", "GET /forbidden"])
    );
}
