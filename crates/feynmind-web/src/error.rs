//! HTTP error mapping.
//!
//! Every failing route answers with `{"detail": "<message>"}` and one of
//! three statuses: 400 for empty required text, 422 for any other input
//! that breaks the request schema, 500 for everything past the caller.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use feynmind_relay::RelayError;
use feynmind_store::StoreError;

/// Error returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required text field was empty after trimming.
    #[error("{0}")]
    BadRequest(String),

    /// The body is malformed or violates a type, length or enum constraint.
    #[error("{0}")]
    Unprocessable(String),

    /// The upstream API, its payload, or the progress store failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::EmptyField { reason } => Self::BadRequest(reason),
            RelayError::InvalidRequest { reason } => Self::Unprocessable(reason),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidArgument(reason) => Self::Unprocessable(reason),
            other => Self::Internal(format!("Progress store error: {other}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), detail = %detail, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), detail = %detail, "request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
