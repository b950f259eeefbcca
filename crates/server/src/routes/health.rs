use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// Liveness probe; touches no external resource.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK", message: "Web scraper API is running" })
}
