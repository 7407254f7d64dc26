//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `InvalidInput` → 400
//! - `EmptyResult` → 404
//! - `Remote` → 404 when the upstream said 404, otherwise 502
//! - `Transport`, `Format` → 502
//! - `Timeout` → 504
//! - `MethodNotAllowed` → 405 (with `Allow: POST`)
//! - `Internal` → 500

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to fetch {url}: HTTP {status}")]
    Remote { url: String, status: u16 },

    #[error("Request to content API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected API response format: {0}")]
    Format(String),

    #[error("No files found or unable to fetch repository contents.")]
    EmptyResult,

    #[error("Timed out after {0:?} fetching repository contents.")]
    Timeout(Duration),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Remote { status: 404, .. } => StatusCode::NOT_FOUND,
            AppError::Remote { .. } | AppError::Transport(_) | AppError::Format(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::EmptyResult => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": self.to_string(),
        }));

        if matches!(self, AppError::MethodNotAllowed(_)) {
            return (status, [(header::ALLOW, "POST")], body).into_response();
        }

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
