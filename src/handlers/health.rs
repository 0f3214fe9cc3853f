//! Health check handler

use axum::{extract::State, Json};

use crate::AppState;
use crate::models::HealthResponse;

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        engine: state.predictor.status(),
    })
}
