use axum::response::Json;
use serde::Serialize;

pub const STATUS: &str = "ok";
pub const MESSAGE: &str = "Smart Potato Farming backend is running";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness probe.
/// Url: /api/health
/// Method: GET
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS,
        message: MESSAGE,
    })
}
