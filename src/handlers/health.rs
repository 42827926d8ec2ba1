use crate::models::{HealthResponse, HEALTH_MESSAGE};
use axum::{http::StatusCode, response::Json};

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
    };

    (StatusCode::OK, Json(response))
}
