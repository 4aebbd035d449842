//! Preferences, translation tables and the metrics endpoint.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, get, send_json};

#[tokio::test]
async fn create_then_read_preference() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v2/preferences",
        &json!({ "name": "frontpageAccounts", "data": [1, 2] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "preferences");
    assert_eq!(body["data"]["id"], "frontpageAccounts");

    let (status, body) = get(&app, "/api/v2/preferences/frontpageAccounts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["data"], json!([1, 2]));
}

#[tokio::test]
async fn duplicate_preference_is_rejected() {
    let app = app();
    let create = json!({ "name": "language", "data": "en_US" });
    let (first, _) = send_json(&app, "POST", "/api/v2/preferences", &create).await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) = send_json(&app, "POST", "/api/v2/preferences", &create).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn put_creates_or_replaces() {
    let app = app();
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/v2/preferences/viewRange",
        &json!({ "data": "1M" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_json(
        &app,
        "PUT",
        "/api/v2/preferences/viewRange",
        &json!({ "data": "3M" }),
    )
    .await;
    assert_eq!(body["data"]["attributes"]["data"], "3M");

    let (_, body) = get(&app, "/api/v2/preferences/viewRange").await;
    assert_eq!(body["data"]["attributes"]["data"], "3M");
}

#[tokio::test]
async fn preferences_are_scoped_to_the_group() {
    let app = app();
    send_json(
        &app,
        "PUT",
        "/api/v2/preferences/viewRange",
        &json!({ "data": "1Y" }),
    )
    .await;

    let (status, _) = get(&app, "/api/v2/preferences/viewRange?user_group_id=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_preference_is_not_found() {
    let (status, body) = get(&app(), "/api/v2/preferences/nothingHere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["exception"], "NotFound");
}

#[tokio::test]
async fn translations_merge_over_fallback_locale() {
    let (status, body) = get(&app(), "/api/v2/i18n/sl_SI").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firefly"]["spent"], "Porabljeno");
    assert_eq!(body["firefly"]["no_budget"], "(no budget)");
    assert_eq!(body["email"]["greeting"], "Hi there,");
}

#[tokio::test]
async fn unknown_locale_is_not_found() {
    let (status, _) = get(&app(), "/api/v2/i18n/xx_XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_render_after_requests() {
    finance_api::observability::init_metrics().unwrap();
    let app = app();
    get(&app, "/health").await;

    let (status, _) = get_text(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
}

async fn get_text(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
