use axum::Json;
use serde::Serialize;

/// Static liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub status: u16,
}

/// GET / -- always `{ "message": "OK", "status": 200 }`.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK",
        status: 200,
    })
}
