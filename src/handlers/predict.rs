//! JSON prediction handler

use axum::{extract::State, Json};

use crate::{AppState, AppResult, AppError};
use crate::logic::features::InputRecord;
use crate::logic::model::SaltReport;
use crate::models::{PredictRequest, PredictResponse};

/// Predict salt level from a feature map
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    if req.features.is_empty() {
        return Err(AppError::ValidationError("features must not be empty".to_string()));
    }

    let layout = state.predictor.layout();
    let record = InputRecord::from_map(layout, req.features)?;
    let prediction = state.predictor.predict(&record)?;

    Ok(Json(PredictResponse {
        report: SaltReport::new(prediction, &record),
        layout_hash: format!("{:08x}", layout.hash()),
    }))
}
