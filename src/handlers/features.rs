//! Artifact metadata handler

use axum::{extract::State, Json};

use crate::AppState;
use crate::logic::model::ArtifactInfo;

/// Feature names, layout hash and artifact kinds
pub async fn list(State(state): State<AppState>) -> Json<ArtifactInfo> {
    Json(state.artifacts.as_ref().clone())
}
