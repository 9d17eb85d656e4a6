use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use thiserror::Error;

/// Failure to turn one raw form field into a feature value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Missing input for: {0}")]
    MissingInput(String),
    #[error("Invalid numeric input for {field}: {raw}")]
    InvalidNumeric { field: String, raw: String },
    #[error("Unrecognized furnishingstatus: {0}")]
    UnrecognizedCategory(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model output length mismatch: got {got}, expected {expected}")]
    Shape { got: usize, expected: usize },
    #[error("model returned no prediction")]
    Empty,
    #[error("model backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{0}")]
    InvalidRoomData(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) | AppError::InvalidRoomData(_) => StatusCode::BAD_REQUEST,
            AppError::Model(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
