//! Error types for the easylabel HTTP server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use easylabel_core::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error, rendered as `{"error": "..."}` with a mapped status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No metadata document exists for the dataset
    #[error("no metadata document configured")]
    MetadataNotFound,

    /// Malformed update payload
    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    /// Store failure, propagated uncaught from the document store
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MetadataNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidUpdate(_) => StatusCode::BAD_REQUEST,
            // Bad filters/updates are the caller's fault; anything else
            // coming out of the store is a server-side failure.
            ApiError::Store(StoreError::InvalidFilter(_))
            | ApiError::Store(StoreError::InvalidUpdate(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
