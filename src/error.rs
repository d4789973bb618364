use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `error`
    pub status: String,
    /// Failure description; for upstream failures, the GitHub response body verbatim
    pub error: String,
    /// HTTP status GitHub answered with, when it answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

/// Everything that can abort a relay request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body missing, not JSON, or lacking required fields.
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// Token or target repository not configured.
    #[error("{0}")]
    Config(String),

    /// GitHub answered with something other than 204.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    /// The request never got a response (connect failure, timeout, ...).
    #[error("Failed to reach GitHub API: {0}")]
    Transport(String),

    /// Unexpected fault, e.g. a panicking handler.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } => StatusCode::BAD_REQUEST,
            RelayError::Config(_) | RelayError::Transport(_) | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let upstream_status = match &self {
            RelayError::Upstream { status, .. } => Some(*status),
            _ => None,
        };
        let body = ErrorResponse {
            status: "error".to_string(),
            error: self.to_string(),
            upstream_status,
        };

        (status, Json(body)).into_response()
    }
}
