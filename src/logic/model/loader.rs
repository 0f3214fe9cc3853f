//! Artifact Loader
//!
//! Reads `feature_names.json`, `scaler.json` and the salt model from the
//! model directory and checks that the three agree with each other before
//! anything is served. Every failure here is fatal to startup.
//!
//! The model is `salt_model.onnx` when that file exists, otherwise the JSON
//! `salt_model.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::inference::{Predictor, Regressor, Transformer};
use super::onnx::OnnxRegressor;
use super::regressor::SaltModel;
use super::scaler::Scaler;
use crate::constants::{FEATURE_NAMES_FILE, MODEL_FILE, MODEL_ONNX_FILE, SCALER_FILE};
use crate::logic::features::{FeatureLayout, LayoutError, LayoutInfo};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid feature names: {0}")]
    Layout(#[from] LayoutError),

    #[error("invalid {artifact}: {reason}")]
    Invalid { artifact: &'static str, reason: String },

    #[error("{artifact} expects {expected} features but the feature name list has {actual}")]
    Incompatible {
        artifact: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Load-time metadata, exposed by the features endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub model_dir: String,
    pub model_kind: String,
    pub scaler_kind: String,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
}

/// The three artifacts, validated against each other
pub struct Artifacts {
    pub layout: FeatureLayout,
    pub scaler: Scaler,
    pub model: Arc<dyn Regressor>,
    pub info: ArtifactInfo,
}

impl Artifacts {
    pub fn into_predictor(self) -> (Predictor, ArtifactInfo) {
        let scaler: Arc<dyn Transformer> = Arc::new(self.scaler);
        (Predictor::new(self.layout, scaler, self.model), self.info)
    }
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts")
            .field("layout", &self.layout)
            .field("scaler", &self.scaler)
            .field("model", &self.info.model_kind)
            .field("info", &self.info)
            .finish()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and cross-check all artifacts in `dir`
pub fn load_artifacts(dir: &Path) -> Result<Artifacts, ArtifactError> {
    tracing::info!("Loading artifacts from: {}", dir.display());

    let names: Vec<String> = read_json(&dir.join(FEATURE_NAMES_FILE))?;
    let layout = FeatureLayout::new(names)?;

    let scaler: Scaler = read_json(&dir.join(SCALER_FILE))?;
    scaler
        .validate()
        .map_err(|reason| ArtifactError::Invalid { artifact: "scaler", reason })?;

    let (model, model_kind) = load_model(dir, layout.len())?;

    check_compatibility(&layout, &scaler, model.as_ref())?;

    let info = ArtifactInfo {
        model_dir: dir.display().to_string(),
        model_kind,
        scaler_kind: scaler.kind().to_string(),
        layout: layout.info(),
        loaded_at: Utc::now(),
    };

    tracing::info!(
        "Artifacts loaded: {} features (layout {}), {} scaler, {} model",
        layout.len(),
        info.layout.hash,
        info.scaler_kind,
        info.model_kind
    );

    Ok(Artifacts { layout, scaler, model, info })
}

/// ONNX export if present, JSON model otherwise
fn load_model(dir: &Path, n_features: usize) -> Result<(Arc<dyn Regressor>, String), ArtifactError> {
    let onnx_path = dir.join(MODEL_ONNX_FILE);
    if onnx_path.is_file() {
        let model = OnnxRegressor::load(&onnx_path, n_features).map_err(|e| ArtifactError::Invalid {
            artifact: "model",
            reason: format!("{}: {}", onnx_path.display(), e),
        })?;
        return Ok((Arc::new(model), "onnx".to_string()));
    }

    tracing::info!("No {} found, using {}", MODEL_ONNX_FILE, MODEL_FILE);
    let model: SaltModel = read_json(&dir.join(MODEL_FILE))?;
    model
        .validate()
        .map_err(|reason| ArtifactError::Invalid { artifact: "model", reason })?;
    let kind = model.kind().to_string();
    Ok((Arc::new(model), kind))
}

fn check_compatibility(layout: &FeatureLayout, scaler: &Scaler, model: &dyn Regressor) -> Result<(), ArtifactError> {
    if scaler.n_features() != layout.len() {
        return Err(ArtifactError::Incompatible {
            artifact: "scaler",
            expected: scaler.n_features(),
            actual: layout.len(),
        });
    }
    if model.n_features() != layout.len() {
        return Err(ArtifactError::Incompatible {
            artifact: "model",
            expected: model.n_features(),
            actual: layout.len(),
        });
    }

    if let Some(fitted) = &scaler.feature_names_in {
        if fitted.as_slice() != layout.names() {
            return Err(ArtifactError::Invalid {
                artifact: "scaler",
                reason: format!(
                    "fitted on columns {:?} but feature names are {:?}",
                    fitted,
                    layout.names()
                ),
            });
        }
    }
    Ok(())
}
