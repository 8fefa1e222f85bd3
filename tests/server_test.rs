// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the HTTP façade.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use mpc_autocomplete_lib::config::model::ModelConfig;
use mpc_autocomplete_lib::data_structures::frequency_trie::codec;
use mpc_autocomplete_lib::data_structures::{Alphabet, FrequencyTrie};
use mpc_autocomplete_lib::model::{MostPopularCompletionModel, SharedModel};
use mpc_autocomplete_lib::server::{router, AppState};

const TIMEOUT: Duration = Duration::from_secs(5);

fn greetings() -> FrequencyTrie {
    FrequencyTrie::from_entries(
        Alphabet::Unicode,
        [
            ("How can I help you?", 4),
            ("How are you?", 2),
            ("Have a great day", 1),
            ("Hello there", 1),
        ],
    )
    .unwrap()
}

fn app(index_path: &Path) -> (Router, Arc<AppState>) {
    let config = ModelConfig {
        max_completions: 3,
        index_path: index_path.to_path_buf(),
        ..ModelConfig::default()
    };
    let model = SharedModel::new(MostPopularCompletionModel::from_trie(greetings(), 3));
    let state = Arc::new(AppState::new(model, &config).unwrap());
    (router(Arc::clone(&state), TIMEOUT), state)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_autocomplete_uses_configured_limit() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir.path().join("index.mpct"));

    let (status, body) = send(app, Method::GET, "/autocomplete?q=H").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["completions"],
        serde_json::json!(["How can I help you?", "How are you?", "Have a great day"])
    );
}

#[tokio::test]
async fn test_autocomplete_with_explicit_k() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir.path().join("index.mpct"));

    let (status, body) = send(app.clone(), Method::GET, "/autocomplete?q=How&k=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completions"], serde_json::json!(["How can I help you?"]));

    let (status, body) = send(app, Method::GET, "/autocomplete?q=H&k=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_autocomplete_empty_and_unknown_prefix() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir.path().join("index.mpct"));

    let (status, body) = send(app.clone(), Method::GET, "/autocomplete?q=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completions"], serde_json::json!([]));

    let (status, body) = send(app, Method::GET, "/autocomplete?q=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_autocomplete_bad_requests() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir.path().join("index.mpct"));

    let (status, body) = send(app.clone(), Method::GET, "/autocomplete").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'q'"));

    let (status, body) = send(app.clone(), Method::GET, "/autocomplete?q=H&k=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(app, Method::GET, "/autocomplete?q=H&k=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app(&dir.path().join("index.mpct"));

    let (status, body) = send(app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["entries"], 4);
    assert_eq!(body["model"], "mpc");
}

#[tokio::test]
async fn test_reload_swaps_model() {
    let dir = TempDir::new().unwrap();
    let index_path = dir.path().join("index.mpct");
    let (app, state) = app(&index_path);

    let replacement =
        FrequencyTrie::from_entries(Alphabet::Unicode, [("Hi!", 9), ("Hey", 1)]).unwrap();
    codec::save(&replacement, &index_path).unwrap();

    let (status, body) = send(app.clone(), Method::POST, "/admin/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"], 2);
    assert_eq!(state.model.snapshot().len(), 2);

    let (_, body) = send(app, Method::GET, "/autocomplete?q=H").await;
    assert_eq!(body["completions"], serde_json::json!(["Hi!", "Hey"]));
}

#[tokio::test]
async fn test_reload_failures_keep_current_model() {
    let dir = TempDir::new().unwrap();
    let index_path = dir.path().join("index.mpct");
    let (app, state) = app(&index_path);

    let (status, body) = send(app.clone(), Method::POST, "/admin/reload").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    std::fs::write(&index_path, b"definitely not an index").unwrap();
    let (status, _) = send(app, Method::POST, "/admin/reload").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(state.model.snapshot().len(), 4);
}
