// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::data_structures::IndexError;

/// Errors returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The request itself is malformed (missing or unparsable parameters).
    #[error("{0}")]
    BadRequest(String),

    /// The index rejected the operation.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A background task failed to complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServerError::BadRequest(msg.into())
    }

    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Index(IndexError::InvalidKey { .. } | IndexError::Config(_)) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Index(IndexError::FileNotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Index(IndexError::Io { .. } | IndexError::CorruptFile(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_case::test_case;

    #[test_case(ServerError::bad_request("missing q") => StatusCode::BAD_REQUEST ; "bad request")]
    #[test_case(ServerError::Index(IndexError::Config("negative".into())) => StatusCode::BAD_REQUEST ; "config")]
    #[test_case(ServerError::Index(IndexError::FileNotFound(PathBuf::from("x"))) => StatusCode::NOT_FOUND ; "missing file")]
    #[test_case(ServerError::Index(IndexError::CorruptFile("crc".into())) => StatusCode::INTERNAL_SERVER_ERROR ; "corrupt")]
    #[test_case(ServerError::Internal("join".into()) => StatusCode::INTERNAL_SERVER_ERROR ; "internal")]
    fn test_status_code(error: ServerError) -> StatusCode {
        error.status_code()
    }
}
