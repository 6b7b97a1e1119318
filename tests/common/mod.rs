//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use specforge::http::GenerationResponse;
use specforge::{HttpServer, ServiceConfig};

/// A server whose artifacts go to a temporary directory.
pub struct TestApp {
    pub router: Router,
    pub server: HttpServer,
    pub dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.generator.output_dir = dir.path().join("generated").to_string_lossy().into_owned();
    config
}

pub fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let server = HttpServer::new(test_config(&dir)).unwrap();
    TestApp {
        router: server.router(),
        server,
        dir,
    }
}

/// Send a GET with optional headers and return status, raw body.
pub async fn get(router: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn get_json(router: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
    let (status, body) = get(router, uri, headers).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Run a generation and decode the response.
pub async fn generate(router: &Router, query: &str) -> GenerationResponse {
    let (status, body) = get(router, &format!("/generate_api?{}", query), &[]).await;
    assert_eq!(status, StatusCode::OK, "generation failed: {}", String::from_utf8_lossy(&body));
    serde_json::from_slice(&body).unwrap()
}
