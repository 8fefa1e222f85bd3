// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::ServerError;
use super::state::AppState;
use crate::model::CompletionLimit;

/// Query string of `GET /autocomplete`.
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    /// Prefix to complete
    pub q: Option<String>,
    /// Number of completions, overriding the configured maximum
    pub k: Option<i64>,
}

/// Body of a successful `GET /autocomplete`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    /// Completions, best first
    pub completions: Vec<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers
    pub status: String,
    /// Entries in the live model
    pub entries: usize,
    /// Variant of the live model
    pub model: String,
}

/// Body of a successful `POST /admin/reload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// Entries in the model now serving
    pub entries: usize,
}

/// Handle GET /autocomplete
pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AutocompleteParams>, QueryRejection>,
) -> Result<Json<AutocompleteResponse>, ServerError> {
    let Query(params) = params.map_err(|e| ServerError::bad_request(e.body_text()))?;
    let prefix = params
        .q
        .ok_or_else(|| ServerError::bad_request("missing query parameter 'q'"))?;
    let limit = match params.k {
        Some(k) => CompletionLimit::try_from(k)?,
        None => state.max_completions,
    };

    let start = Instant::now();
    let completions = state.model.snapshot().complete_with_limit(&prefix, limit);
    debug!(
        prefix = %prefix,
        limit = limit.get(),
        found = completions.len(),
        took_us = start.elapsed().as_micros() as u64,
        "Answered autocomplete query"
    );

    Ok(Json(AutocompleteResponse { completions }))
}

/// Handle GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model = state.model.snapshot();
    Json(HealthResponse {
        status: "ok".to_string(),
        entries: model.len(),
        model: model.kind().to_string(),
    })
}

/// Handle POST /admin/reload
///
/// The index file is read on a blocking thread; queries keep being served
/// by the previous model until the new one is swapped in.
pub async fn reload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ServerError> {
    let task_state = Arc::clone(&state);
    let model = tokio::task::spawn_blocking(move || {
        task_state.load_model(&task_state.index_path)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    let entries = model.len();
    state.model.replace(model);
    info!(
        path = %state.index_path.display(),
        entries,
        "Reloaded index"
    );

    Ok(Json(ReloadResponse { entries }))
}
