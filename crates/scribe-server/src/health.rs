use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; does not touch the transcription provider
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
