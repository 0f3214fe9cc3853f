//! Inference Engine - scaler -> model call chain
//!
//! The scaler and the model are opaque to the rest of the service: the
//! `Predictor` only sees the `Transformer` and `Regressor` traits, so the
//! concrete artifact formats can change without touching the handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ndarray::{Array1, Array2, ArrayView2};
use serde::Serialize;
use thiserror::Error;

use crate::logic::features::{FeatureLayout, InputRecord, RecordError};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Recoverable, per-request failure
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("{stage} expects {expected} features, got {actual}")]
    WidthMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("input columns do not follow the feature layout")]
    ColumnOrder,

    #[error("model returned no prediction")]
    EmptyOutput,

    #[error("model returned a non-finite prediction ({0})")]
    NonFinite(f64),

    #[error("{0}")]
    Backend(String),
}

// ============================================================================
// TRAITS
// ============================================================================

/// Pre-fitted feature transform
pub trait Transformer: Send + Sync {
    fn n_features(&self) -> usize;
    fn transform(&self, rows: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError>;
}

/// Pre-fitted regression model
pub trait Regressor: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError>;
}

// ============================================================================
// PREDICTOR
// ============================================================================

#[derive(Debug, Default)]
struct InferenceStats {
    predictions: AtomicU64,
    failures: AtomicU64,
    latency_sum_us: AtomicU64,
}

/// Engine status for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub prediction_count: u64,
    pub failure_count: u64,
    pub avg_latency_ms: f64,
}

/// Loaded artifacts, shared read-only by every request
pub struct Predictor {
    layout: FeatureLayout,
    scaler: Arc<dyn Transformer>,
    model: Arc<dyn Regressor>,
    stats: InferenceStats,
}

impl Predictor {
    pub fn new(layout: FeatureLayout, scaler: Arc<dyn Transformer>, model: Arc<dyn Regressor>) -> Self {
        Self {
            layout,
            scaler,
            model,
            stats: InferenceStats::default(),
        }
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// Scale the record, then predict one salt concentration (mg/L)
    pub fn predict(&self, record: &InputRecord) -> Result<f64, InferenceError> {
        let start = Instant::now();
        let result = self.run(record);
        let elapsed = start.elapsed().as_micros() as u64;

        match &result {
            Ok(value) => {
                self.stats.predictions.fetch_add(1, Ordering::Relaxed);
                self.stats.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
                tracing::debug!(prediction = *value, latency_us = elapsed, "prediction complete");
            }
            Err(e) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Prediction failed: {}", e);
            }
        }

        result
    }

    fn run(&self, record: &InputRecord) -> Result<f64, InferenceError> {
        if record.len() != self.layout.len() {
            return Err(InferenceError::WidthMismatch {
                stage: "record",
                expected: self.layout.len(),
                actual: record.len(),
            });
        }
        let in_order = record
            .entries()
            .iter()
            .zip(self.layout.names())
            .all(|((name, _), expected)| name == expected);
        if !in_order {
            return Err(InferenceError::ColumnOrder);
        }

        let row = record.to_row();
        let scaled = self.scaler.transform(row.view())?;
        let output = self.model.predict(scaled.view())?;

        let value = *output.first().ok_or(InferenceError::EmptyOutput)?;
        if !value.is_finite() {
            return Err(InferenceError::NonFinite(value));
        }
        Ok(value)
    }

    pub fn status(&self) -> EngineStatus {
        let count = self.stats.predictions.load(Ordering::Relaxed);
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        EngineStatus {
            prediction_count: count,
            failure_count: self.stats.failures.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}
