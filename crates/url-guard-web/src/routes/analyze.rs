//! URL analysis handler.

use axum::{body::Bytes, extract::State, Json};
use url_guard_core::{AnalysisError, AnalysisResult, ScanRequest};

use super::ApiError;
use crate::state::AppState;

/// `POST /analyze-url`
///
/// The body is decoded by hand so a malformed payload still yields the JSON
/// error shape instead of the extractor's plain-text rejection.
pub async fn analyze_url(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request: ScanRequest = serde_json::from_slice(&body)
        .map_err(|err| AnalysisError::InvalidRequest(err.to_string()))?;
    let result = state.analyzer.analyze(&request).await?;
    Ok(Json(result))
}
