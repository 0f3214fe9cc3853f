//! Prediction logic: feature layout, artifacts, inference and verdicts

pub mod features;
pub mod model;
