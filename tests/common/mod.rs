#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::config::{Config, StorageBackend};
use snaplink::infrastructure::Repositories;
use snaplink::routes::build_router;
use snaplink::state::AppState;

pub const BASE_URL: &str = "https://sl.test";
pub const FALLBACK_URL: &str = "https://status.sl.test";
pub const COUNTRY_HEADER: &str = "cf-ipcountry";
pub const PASSWORD: &str = "correct horse battery";

pub fn test_config() -> Config {
    Config {
        storage: StorageBackend::Memory,
        database_url: None,
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "debug".to_string(),
        log_format: "text".to_string(),
        base_url: BASE_URL.to_string(),
        fallback_url: FALLBACK_URL.to_string(),
        attribute_links: true,
        geo_country_header: Some(COUNTRY_HEADER.to_string()),
        geo_fallback_country: "Unknown".to_string(),
        session_signing_secret: "test-secret".to_string(),
        session_ttl_hours: 1,
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 1,
        db_max_lifetime: 1,
    }
}

/// State over a fresh in-memory store.
pub fn create_test_state(config: &Config) -> AppState {
    AppState::new(config, Repositories::in_memory())
}

pub fn create_test_server() -> TestServer {
    server_with_config(&test_config())
}

pub fn server_with_config(config: &Config) -> TestServer {
    TestServer::new(build_router(create_test_state(config))).unwrap()
}

/// Registers an account and returns a bearer token for it.
pub async fn signed_in(server: &TestServer, email: &str) -> String {
    server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "name": "Tester", "password": PASSWORD }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let session: Value = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await
        .json();

    session["token"].as_str().unwrap().to_string()
}

/// Creates a link through the API and returns the response body.
pub async fn shorten(server: &TestServer, url: &str, custom_code: Option<&str>) -> Value {
    let response = server
        .post("/api/links")
        .json(&json!({ "url": url, "custom_code": custom_code }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}
