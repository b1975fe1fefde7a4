//! Error responses for the REST API.
//!
//! Every failure carries one fixed message per endpoint. The underlying
//! store error is logged here and never reaches the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use registrar_state::StoreError;
use tracing::error;

/// A status code plus a static message, rendered as `{"error": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Collapse a store failure into a 500, logging the cause.
    pub fn internal(message: &'static str, cause: StoreError) -> Self {
        error!(error = %cause, "{message}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_hides_cause() {
        let err = ApiError::internal(
            "Failed to delete Student",
            StoreError::NotFound {
                entity: "student",
                id: 7,
            },
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to delete Student");
    }

    #[test]
    fn renders_status() {
        let resp = ApiError::not_found("Course not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
