use crate::dtos::StatusResponse;
use axum::Json;

/// Liveness probe. Never touches the document store.
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::OK)
}
