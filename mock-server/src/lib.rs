use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Every request served, as `"METHOD /path"`, oldest first.
pub type Journal = Arc<RwLock<Vec<String>>>;

pub fn app() -> Router {
    app_with_journal(Journal::default())
}

pub fn app_with_journal(journal: Journal) -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/json/object", get(json_object))
        .route("/json/array", get(json_array))
        .route("/forbidden", get(forbidden))
        .route("/status/{code}", get(status))
        .route("/bytes/invalid-utf8", get(invalid_utf8))
        .route("/empty", get(empty))
        .route("/echo", post(echo).put(echo))
        .route("/requests", get(requests))
        .layer(middleware::from_fn_with_state(journal.clone(), record))
        .with_state(journal)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn record(State(journal): State<Journal>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if path != "/requests" {
        let entry = format!("{} {path}", request.method());
        log::debug!("{entry}");
        journal.write().await.push(entry);
    }
    next.run(request).await
}

async fn hello() -> &'static str {
    "hello"
}

async fn json_object() -> Json<Value> {
    Json(json!({ "a": 1 }))
}

async fn json_array() -> Json<Value> {
    Json(json!([1, 2, 3]))
}

async fn forbidden() -> (StatusCode, &'static str) {
    (StatusCode::FORBIDDEN, "forbidden")
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

async fn invalid_utf8() -> Vec<u8> {
    vec![0x68, 0x69, 0xff, 0xfe]
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn echo(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    ([(header::CONTENT_TYPE, content_type)], body)
}

async fn requests(State(journal): State<Journal>) -> Json<Vec<String>> {
    Json(journal.read().await.clone())
}
