//! API error type and HTTP status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use missive_core::MissiveError;
use serde_json::json;

/// An HTTP-facing failure: a status code plus a `detail` message.
///
/// Every error body has the shape `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }
}

impl From<MissiveError> for ApiError {
    fn from(err: MissiveError) -> Self {
        match &err {
            MissiveError::UnsupportedPlatform(_) => {
                Self { status: StatusCode::BAD_REQUEST, detail: "Unsupported platform.".to_string() }
            }
            MissiveError::HttpError(inner) => Self {
                status: StatusCode::BAD_GATEWAY,
                detail: format!("Failed to fetch the URL: {}", inner),
            },
            MissiveError::Timeout { .. } | MissiveError::InvalidUrl(_) => Self {
                status: StatusCode::BAD_GATEWAY,
                detail: format!("Failed to fetch the URL: {}", err),
            },
            _ => Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: err.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, detail = %self.detail, "request failed");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
