//! Model Module - Artifact loading and salt level inference
//!
//! Loader builds the scaler and model (ONNX or JSON) once; the Predictor runs them per
//! request; verdict turns the number into the page's result section.

pub mod inference;
pub mod loader;
pub mod onnx;
pub mod regressor;
pub mod scaler;
pub mod verdict;

// Re-export common types
pub use inference::{EngineStatus, InferenceError, Predictor, Regressor, Transformer};
pub use loader::{load_artifacts, ArtifactError, ArtifactInfo, Artifacts};
pub use onnx::OnnxRegressor;
pub use regressor::SaltModel;
pub use scaler::Scaler;
pub use verdict::SaltReport;
