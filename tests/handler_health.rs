mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::domain::entities::{Link, NewLink};
use snaplink::domain::errors::RepositoryError;
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::Repositories;
use snaplink::routes::build_router;
use snaplink::state::AppState;
use std::sync::Arc;

/// Link store whose every call fails as if the database were down.
struct UnreachableLinks;

fn down() -> RepositoryError {
    RepositoryError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl LinkRepository for UnreachableLinks {
    async fn create(&self, _new_link: NewLink) -> Result<Link, RepositoryError> {
        Err(down())
    }
    async fn find_by_code(&self, _short_code: &str) -> Result<Option<Link>, RepositoryError> {
        Err(down())
    }
    async fn find_by_id(&self, _id: i64) -> Result<Option<Link>, RepositoryError> {
        Err(down())
    }
    async fn list(
        &self,
        _owner: Option<i64>,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<Link>, RepositoryError> {
        Err(down())
    }
    async fn count(&self, _owner: Option<i64>) -> Result<i64, RepositoryError> {
        Err(down())
    }
    async fn increment_click_count(&self, _id: i64) -> Result<(), RepositoryError> {
        Err(down())
    }
    async fn delete(&self, _id: i64) -> Result<bool, RepositoryError> {
        Err(down())
    }
}

fn degraded_server() -> TestServer {
    let mut repositories = Repositories::in_memory();
    repositories.links = Arc::new(UnreachableLinks);

    let state = AppState::new(&common::test_config(), repositories);
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let server = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["status"], "ok");
    assert_eq!(body["storage"]["links"], 0);
}

#[tokio::test]
async fn test_health_degraded_when_storage_down() {
    let server = degraded_server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"]["status"], "error");
}

#[tokio::test]
async fn test_redirect_falls_back_when_storage_down() {
    let server = degraded_server();

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), common::FALLBACK_URL);
}

#[tokio::test]
async fn test_create_link_when_storage_down() {
    let server = degraded_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "service_unavailable");
    assert!(!body.to_string().contains("connection refused"));
}
