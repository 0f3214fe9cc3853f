//! Prediction API bodies

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logic::model::{EngineStatus, SaltReport};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub report: SaltReport,
    pub layout_hash: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
    pub environment: String,
    pub engine: EngineStatus,
}
