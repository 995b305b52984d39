#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use catalog_service::config::CatalogConfig;
use catalog_service::models::Product;
use catalog_service::services::{CatalogDb, MockProductStore};
use catalog_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Configuration pointing at a local store; nothing connects until used.
pub fn test_config() -> CatalogConfig {
    CatalogConfig::from_lookup(CoreConfig::default(), |key| match key {
        "COSMOS_ENDPOINT" => Some(TEST_MONGODB_URI.to_string()),
        _ => None,
    })
    .expect("Failed to build test configuration")
}

/// Router backed by an in-memory store the test keeps a handle to.
pub fn mock_app(store: Arc<MockProductStore>) -> Router {
    build_router(AppState::new(store))
}

pub fn product(id: &str, name: &str, category: &str) -> Product {
    Product::new(
        id.to_string(),
        Some(name.to_string()),
        Some(category.to_string()),
    )
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Full application on a random port against a live MongoDB.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: CatalogDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("catalog_test_{}", Uuid::new_v4());

        let mut config = test_config();
        config.common.port = 0; // Random port for testing
        config.store.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/healthz", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
