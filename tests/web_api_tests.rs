//! Integration tests for the keycodec Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use keycodec::config::Config;
use keycodec::services::{JsonFileStore, LayoutRegistry};
use keycodec::web::{create_router, AppState};

mod fixtures;
use fixtures::{form_body, qwe_grids};

/// Creates a test AppState with an empty registry in a temporary dir.
fn create_test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut config = Config::new();
    config.storage.layouts_file = Some(temp_dir.path().join("layouts.json"));
    config.storage.seed_builtin = false;

    let state = AppState::from_config(config).expect("Failed to create app state");
    (state, temp_dir)
}

/// Creates a test AppState holding only the "qwerty" scenario layout.
fn create_qwerty_state() -> (AppState, TempDir) {
    let (state, temp_dir) = create_test_state();
    let (lowercase, uppercase) = qwe_grids();
    state
        .registry()
        .add("qwerty", "QWERTY", lowercase, uppercase)
        .expect("Failed to add layout");
    (state, temp_dir)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post_form(app: &axum::Router, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .unwrap(),
    )
    .await
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_list_layouts_empty() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/layouts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["layouts"], json!([]));
}

#[tokio::test]
async fn test_list_layouts_seeded() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("layouts.json"));
    let registry = LayoutRegistry::with_builtin_layouts(Box::new(store)).unwrap();
    let app = create_router(AppState::new(Config::new(), registry));

    let (status, json) = get_json(&app, "/layouts").await;

    assert_eq!(status, StatusCode::OK);
    let layouts = json["layouts"].as_array().unwrap();
    assert_eq!(layouts[0], json!({"key": "qy", "name": "QWERTY"}));
    assert!(layouts.iter().any(|l| l["key"] == "dk"));
}

#[tokio::test]
async fn test_get_layout() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/layouts/qwerty").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "QWERTY");
    assert_eq!(json["lowercase"], json!([["q", "w", "e"]]));
    assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);

    let (status, json) = get_json(&app, "/layouts/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");
}

#[tokio::test]
async fn test_encode_and_decode() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = post_form(
        &app,
        "/encode",
        &[("text_to_encode", "qwe"), ("layout_name", "qwerty")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["encoded_text"], "01x01 01x02 01x03");

    let (status, json) = post_form(
        &app,
        "/decode",
        &[("text_to_decode", "01x01 01x02 01x03"), ("layout_name", "qwerty")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["decoded_text"], "qwe");
}

#[tokio::test]
async fn test_encode_with_spaces_and_upper_case() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = post_form(
        &app,
        "/encode",
        &[("text_to_encode", "We q"), ("layout_name", "qwerty")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["encoded_text"], "11x02 01x03 00x00 01x01");
}

#[tokio::test]
async fn test_encode_uses_default_layout() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::new();
    config.storage.layouts_file = Some(temp_dir.path().join("layouts.json"));
    let app = create_router(AppState::from_config(config).unwrap());

    let (status, json) = post_form(&app, "/encode", &[("text_to_encode", "q")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["encoded_text"], "02x01");
}

#[tokio::test]
async fn test_encode_decode_non_ascii_form_fields() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::new();
    config.storage.layouts_file = Some(temp_dir.path().join("layouts.json"));
    let app = create_router(AppState::from_config(config).unwrap());

    // й is typed as и plus the combining breve
    let (status, json) = post_form(
        &app,
        "/encode",
        &[("text_to_encode", "йцу"), ("layout_name", "jn")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["encoded_text"], "04x05 00x07 02x02 02x03");

    let (status, json) = post_form(
        &app,
        "/decode",
        &[("text_to_decode", "04x05 00x07 02x02 02x03"), ("layout_name", "jn")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["decoded_text"], "йцу");

    let (status, json) = post_form(&app, "/encode", &[("text_to_encode", "é")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["encoded_text"], "02x03 00x02");
}

#[tokio::test]
async fn test_encode_errors() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = post_form(&app, "/encode", &[("layout_name", "qwerty")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("No text"));

    let (status, json) = post_form(
        &app,
        "/encode",
        &[("text_to_encode", "qwx"), ("layout_name", "qwerty")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "unsupported_character");
    assert!(json["error"].as_str().unwrap().contains("index 2"));

    let (status, json) = post_form(
        &app,
        "/encode",
        &[("text_to_encode", "q"), ("layout_name", "nope")],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");
}

#[tokio::test]
async fn test_decode_malformed_token() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = post_form(
        &app,
        "/decode",
        &[("text_to_decode", "01x01 bogus"), ("layout_name", "qwerty")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "malformed_token");
    assert!(json.get("decoded_text").is_none());
}

#[tokio::test]
async fn test_add_layout_success() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/add_layout",
        json!({
            "layout_key": "abc",
            "layout_name": "ABC",
            "layout_lowercase": [["a", "b", "c"]],
            "layout_uppercase": [["A", "B", "C"]],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Layout 'ABC' added successfully");

    let stored = std::fs::read_to_string(temp_dir.path().join("layouts.json")).unwrap();
    assert!(stored.contains("\"abc\""));

    let (status, json) = get_json(&app, "/layouts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["layouts"], json!([{"key": "abc", "name": "ABC"}]));
}

#[tokio::test]
async fn test_add_layout_errors() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/add_layout",
        json!({
            "layout_key": "qwerty",
            "layout_name": "Again",
            "layout_lowercase": [["a"]],
            "layout_uppercase": [["A"]],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "duplicate_key");

    let (status, json) = post_json(
        &app,
        "/add_layout",
        json!({
            "layout_name": "No Key",
            "layout_lowercase": [["a"]],
            "layout_uppercase": [["A"]],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "missing_field");

    let (status, json) = post_json(
        &app,
        "/add_layout",
        json!({
            "layout_key": "shape",
            "layout_name": "Shape",
            "layout_lowercase": [["a", "b"]],
            "layout_uppercase": [["A"]],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_layout");

    let (status, json) = post_json(
        &app,
        "/add_layout",
        json!({
            "layout_key": "../etc",
            "layout_name": "Bad",
            "layout_lowercase": [["a"]],
            "layout_uppercase": [["A"]],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_key");
}

#[tokio::test]
async fn test_add_layout_malformed_json() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/add_layout")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_switch_layout() {
    let (state, _temp_dir) = create_qwerty_state();
    let app = create_router(state);

    let (status, json) = post_form(&app, "/switch_layout", &[("layout_name", "qwerty")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Switched to layout 'QWERTY'");

    let (status, json) = post_form(&app, "/switch_layout", &[("layout_name", "nope")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");

    let (status, json) = post_form(&app, "/switch_layout", &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "missing_field");
}
