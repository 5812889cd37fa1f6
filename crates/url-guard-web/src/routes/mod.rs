//! Route handlers.

pub mod analyze;
pub mod health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use url_guard_core::AnalysisError;

/// Error wrapper rendering `{ "error": message }` with the mapped status.
#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error!(status = status.as_u16(), error = %self.0, "analysis request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
