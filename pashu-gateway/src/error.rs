//! Error types for pashu-gateway
//!
//! Only the upload variants are client errors. Store failures never appear
//! here: they are absorbed by the audit logger and the health monitor before
//! reaching the request path.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned when a request carries no files
pub const EMPTY_BATCH_MESSAGE: &str = "No files uploaded";

/// Request-path error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No files in the request (400)
    #[error("No files uploaded")]
    EmptyBatch,

    /// Multipart body could not be read (400)
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    /// Upload exceeded the configured body limit (413)
    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    /// Dispatch to an unregistered module name (500)
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// Module returned an error or broke its output contract (500)
    #[error("Prediction module '{module}' failed: {reason}")]
    PredictionFailure { module: String, reason: String },
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            GatewayError::EmptyBatch => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            GatewayError::MalformedUpload(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            GatewayError::UploadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            GatewayError::UnknownModule(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN_MODULE"),
            GatewayError::PredictionFailure { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PREDICTION_FAILED")
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for request handlers
pub type GatewayResult<T> = Result<T, GatewayError>;
