//! ONNX Regressor - ONNX Runtime backed salt model
//!
//! Runs a regression graph exported from the training pipeline. The graph
//! takes one `float32 [N, n_features]` input and returns `N` predictions.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2, ArrayView2};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::inference::{InferenceError, Regressor};

pub struct OnnxRegressor {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    output_name: String,
    n_features: usize,
    path: PathBuf,
}

impl OnnxRegressor {
    /// Load the graph at `path` for rows of `n_features` columns
    pub fn load(path: &Path, n_features: usize) -> Result<Self, InferenceError> {
        tracing::info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| InferenceError::Backend(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Backend(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| InferenceError::Backend(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| InferenceError::Backend("model defines no output".to_string()))?;

        let regressor = Self {
            session: Mutex::new(session),
            output_name,
            n_features,
            path: path.to_path_buf(),
        };

        // a graph built for another width fails here rather than on the first request
        regressor.predict(Array2::<f64>::zeros((1, n_features)).view())?;

        tracing::info!("ONNX model loaded successfully");
        Ok(regressor)
    }
}

impl Regressor for OnnxRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        if rows.ncols() != self.n_features {
            return Err(InferenceError::WidthMismatch {
                stage: "model",
                expected: self.n_features,
                actual: rows.ncols(),
            });
        }

        let input_tensor = Value::from_array(rows.mapv(|v| v as f32))
            .map_err(|e| InferenceError::Backend(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Backend(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name).ok_or(InferenceError::EmptyOutput)?;
        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Backend(format!("Extract error: {}", e)))?;

        // [N] or [N, 1]: one value per row either way
        if data.len() < rows.nrows() {
            return Err(InferenceError::EmptyOutput);
        }
        Ok(data.iter().take(rows.nrows()).map(|v| f64::from(*v)).collect())
    }
}

impl std::fmt::Debug for OnnxRegressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxRegressor")
            .field("path", &self.path)
            .field("output_name", &self.output_name)
            .field("n_features", &self.n_features)
            .finish()
    }
}
