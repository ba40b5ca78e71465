mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use short_url::api::dto::urls::UrlMappingResponse;
use short_url::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_create_url_success() {
    let (server, backends) = common::ready_server();

    let response = server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: UrlMappingResponse = response.json();
    assert_eq!(body.original_url, "https://example.com/a");
    assert_eq!(body.short_code.len(), 6);
    assert!(body.short_code.chars().all(|c| c.is_ascii_alphanumeric()));

    let stored = backends
        .repository
        .find_by_code(&body.short_code)
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_create_url_does_not_touch_cache() {
    let (server, backends) = common::ready_server();

    server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert!(backends.cache.is_empty());
}

#[tokio::test]
async fn test_create_url_missing_field() {
    let (server, backends) = common::ready_server();

    let response = server.post("/urls").json(&json!({})).await;

    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "original_url is required");

    assert!(backends.repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_url_empty_string() {
    let (server, backends) = common::ready_server();

    let response = server
        .post("/urls")
        .json(&json!({ "original_url": "" }))
        .await;

    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "original_url is required");

    assert!(backends.repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_url_null_field() {
    let (server, _backends) = common::ready_server();

    let response = server
        .post("/urls")
        .json(&json!({ "original_url": null }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_url_malformed_json() {
    let (server, _backends) = common::ready_server();

    let response = server
        .post("/urls")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_same_url_twice_gives_distinct_codes() {
    let (server, _backends) = common::ready_server();

    let first: UrlMappingResponse = server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/same" }))
        .await
        .json();
    let second: UrlMappingResponse = server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/same" }))
        .await
        .json();

    assert_ne!(first.short_code, second.short_code);
}

#[tokio::test]
async fn test_list_urls_empty() {
    let (server, _backends) = common::ready_server();

    let response = server.get("/urls").await;

    response.assert_status_ok();
    let body: Vec<UrlMappingResponse> = response.json();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_urls_returns_created_entry() {
    let (server, _backends) = common::ready_server();

    let created: UrlMappingResponse = server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await
        .json();

    let response = server.get("/urls").await;

    response.assert_status_ok();
    let body: Vec<UrlMappingResponse> = response.json();
    assert_eq!(body, vec![created]);
}

#[tokio::test]
async fn test_list_urls_newest_first() {
    let (server, backends) = common::ready_server();

    common::insert_mapping(&backends.repository, "first1", "https://example.com/1").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    common::insert_mapping(&backends.repository, "second", "https://example.com/2").await;

    let body: Vec<UrlMappingResponse> = server.get("/urls").await.json();

    let codes: Vec<&str> = body.iter().map(|m| m.short_code.as_str()).collect();
    assert_eq!(codes, vec!["second", "first1"]);
}

#[tokio::test]
async fn test_create_url_keeps_value_verbatim() {
    let (state, _backends) = common::create_test_state(short_url::startup::StartupState::Ready);
    let server = common::create_test_server(state.clone());

    let created: UrlMappingResponse = server
        .post("/urls")
        .json(&json!({ "original_url": "  https://example.com/a  " }))
        .await
        .json();

    assert_eq!(created.original_url, "  https://example.com/a  ");

    let listed: Vec<UrlMappingResponse> = server.get("/urls").await.json();
    assert_eq!(listed[0].original_url, "  https://example.com/a  ");

    let resolved = state.resolver.resolve(&created.short_code).await.unwrap();
    assert_eq!(resolved, "  https://example.com/a  ");
}

#[tokio::test]
async fn test_create_whitespace_only_url_is_accepted() {
    let (server, _backends) = common::ready_server();

    let response = server
        .post("/urls")
        .json(&json!({ "original_url": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}
