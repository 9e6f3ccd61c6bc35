#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use taskboard_api::config::ServerConfig;
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_core::pagination::SortFieldMode;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        sort_field_mode: SortFieldMode::Permissive,
    }
}

/// Build the full application router on a fresh in-memory store.
///
/// Clone the returned router to send several requests against the same data.
pub fn build_test_app() -> Router {
    build_app_with(test_config())
}

pub fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState::in_memory(&config);
    build_app_router(state, &config)
}

/// Build the full application router on a PostgreSQL pool, usually the one
/// handed to a `#[sqlx::test]` function.
pub fn build_test_app_with_pool(pool: sqlx::PgPool) -> Router {
    let config = test_config();
    let state = AppState::with_pool(pool, &config);
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Create a category and return its id, asserting the request succeeded.
pub async fn create_category(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/categories",
        serde_json::json!({"name": name, "description": format!("{name} things")}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a task and return its id, asserting the request succeeded.
pub async fn create_task(app: &Router, name: &str, category_id: i64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/tasks",
        serde_json::json!({
            "name": name,
            "description": "Desc",
            "status": "Pending",
            "categoryId": category_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
