//! Error types for ivr-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// ivr-api error type
///
/// Caller input never reaches here; only server-side defects such as a
/// document that fails to render, or a listener that cannot bind.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] ivr_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Webhook failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
