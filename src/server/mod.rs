// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! HTTP façade over the completion model.
//!
//! # Endpoints
//!
//! - `GET /autocomplete?q=<prefix>[&k=<n>]` - Completions for a prefix
//! - `GET /health` - Liveness and model size
//! - `POST /admin/reload` - Reload the index file and swap it in

mod error;
mod routes;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::server::ServerConfig;
use crate::error::MpcResult;

pub use error::{ErrorResponse, ServerError};
pub use routes::{AutocompleteParams, AutocompleteResponse, HealthResponse, ReloadResponse};
pub use state::{load_model, AppState};

/// Builds the router, without a listener attached.
pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/autocomplete", get(routes::autocomplete))
        .route("/health", get(routes::health))
        .route("/admin/reload", post(routes::reload))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `state` on the configured address until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> MpcResult<()> {
    let app = router(state, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.address).await?;
    info!(
        name = %config.name,
        address = %listener.local_addr()?,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
