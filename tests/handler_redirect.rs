mod common;

use axum::http::StatusCode;
use serde_json::Value;

const FIREFOX_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0";

#[tokio::test]
async fn test_redirect_to_original_url() {
    let server = common::create_test_server();
    common::shorten(&server, "example.com/landing", Some("go")).await;

    let response = server.get("/go").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/landing");
}

#[tokio::test]
async fn test_redirect_unknown_code_goes_to_not_found_page() {
    let server = common::create_test_server();

    let response = server.get("/nothing-here").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/404");
}

#[tokio::test]
async fn test_redirect_malformed_code_goes_to_not_found_page() {
    let server = common::create_test_server();

    let response = server.get("/bad.code").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/404");
}

#[tokio::test]
async fn test_redirect_counts_every_visit() {
    let server = common::create_test_server();
    let link = common::shorten(&server, "https://example.com", Some("counted")).await;
    let token = common::signed_in(&server, "viewer@example.com").await;

    for _ in 0..3 {
        server.get("/counted").await;
    }

    let body: Value = server
        .get(&format!("/api/links/{}", link["id"]))
        .authorization_bearer(&token)
        .await
        .json();

    assert_eq!(body["click_count"], 3);
}

#[tokio::test]
async fn test_redirect_records_visitor_profile() {
    let server = common::create_test_server();
    let link = common::shorten(&server, "https://example.com", Some("profiled")).await;
    let token = common::signed_in(&server, "viewer@example.com").await;

    server
        .get("/profiled")
        .add_header("user-agent", FIREFOX_UA)
        .add_header(common::COUNTRY_HEADER, "de")
        .await;
    server.get("/profiled").await;

    let body: Value = server
        .get(&format!("/api/links/{}/clicks", link["id"]))
        .authorization_bearer(&token)
        .await
        .json();

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    let newest = &items[0];
    assert_eq!(newest["country"], "Unknown");
    assert_eq!(newest["browser"], "Unknown");

    let oldest = &items[1];
    assert_eq!(oldest["country"], "DE");
    assert_eq!(oldest["browser"], "Firefox");
    assert_eq!(oldest["device"], "desktop");
}

#[tokio::test]
async fn test_redirect_ignores_country_header_when_disabled() {
    let mut config = common::test_config();
    config.geo_country_header = None;
    let server = common::server_with_config(&config);
    let link = common::shorten(&server, "https://example.com", Some("nogeo")).await;
    let token = common::signed_in(&server, "viewer@example.com").await;

    server
        .get("/nogeo")
        .add_header(common::COUNTRY_HEADER, "FR")
        .await;

    let body: Value = server
        .get(&format!("/api/links/{}/clicks", link["id"]))
        .authorization_bearer(&token)
        .await
        .json();

    assert_eq!(body["items"][0]["country"], "Unknown");
}

#[tokio::test]
async fn test_custom_code_round_trip_and_short_code_rejection() {
    let server = common::create_test_server();

    let link = common::shorten(&server, "example.com", Some("my-link")).await;
    assert_eq!(link["short_url"], "https://sl.test/my-link");

    let response = server.get("/my-link").await;
    assert_eq!(response.header("location"), "https://example.com");

    let rejected = server
        .post("/api/links")
        .json(&serde_json::json!({ "url": "example.com", "custom_code": "ab" }))
        .await;
    rejected.assert_status_bad_request();
    let body: Value = rejected.json();
    assert_eq!(body["error"]["details"]["reason"], "too short");
}
