#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use impactlab::config::Config;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;
    config
}

pub async fn spawn_app() -> Router {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> Router {
    let state = impactlab::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    impactlab::api::router(state).await
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, _, json) = send_raw(app, method, uri, cookie, body).await;
    (status, json)
}

/// Like `send`, but also hands back the session cookie the response set.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, set_cookie, json)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, cookie, body) = send_raw(
        app,
        "POST",
        "/api/auth",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    cookie.expect("login did not set a session cookie")
}

/// Seeds the default admin and signs in as them.
pub async fn admin_session(app: &Router) -> String {
    let (status, _) = send(app, "GET", "/api/init", None, None).await;
    assert_eq!(status, StatusCode::OK);
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Registers a client account and returns its id with a signed-in cookie.
pub async fn client_session(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": "secret123",
            "confirmPassword": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let cookie = login(app, email, "secret123").await;
    (id, cookie)
}

pub async fn create_room(app: &Router, admin: &str, name: &str, price: f64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/rooms",
        Some(admin),
        Some(serde_json::json!({
            "name": name,
            "type": "Private Office",
            "capacity": "1-4",
            "pricePerHour": price,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "room creation failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}
