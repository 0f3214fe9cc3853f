//! Feature Scaler
//!
//! Pre-fitted normalization applied to raw measurements before the model.
//! Two methods are supported:
//! - `standard`: `(x - mean) / scale`
//! - `min_max`:  `(x - data_min) / (data_max - data_min)` mapped into `feature_range`
//!
//! A zero `scale` or a zero data range is treated as 1, so constant
//! features pass through shifted but unscaled.

use ndarray::{Array1, Array2, ArrayView2};
use serde::Deserialize;

use super::inference::{InferenceError, Transformer};

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingMethod {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
}

/// Scaler artifact as stored in `scaler.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    /// Column names seen at fit time, when recorded
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,

    #[serde(flatten)]
    pub method: ScalingMethod,
}

impl Scaler {
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            feature_names_in: None,
            method: ScalingMethod::Standard { mean, scale },
        }
    }

    pub fn min_max(data_min: Vec<f64>, data_max: Vec<f64>) -> Self {
        Self {
            feature_names_in: None,
            method: ScalingMethod::MinMax {
                data_min,
                data_max,
                feature_range: default_feature_range(),
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.method {
            ScalingMethod::Standard { .. } => "standard",
            ScalingMethod::MinMax { .. } => "min_max",
        }
    }

    /// Check parameter shapes and values
    pub fn validate(&self) -> Result<(), String> {
        match &self.method {
            ScalingMethod::Standard { mean, scale } => {
                if mean.len() != scale.len() {
                    return Err(format!(
                        "mean has {} entries but scale has {}",
                        mean.len(),
                        scale.len()
                    ));
                }
                if mean.iter().chain(scale).any(|v| !v.is_finite()) {
                    return Err("mean and scale must be finite".to_string());
                }
            }
            ScalingMethod::MinMax { data_min, data_max, feature_range } => {
                if data_min.len() != data_max.len() {
                    return Err(format!(
                        "data_min has {} entries but data_max has {}",
                        data_min.len(),
                        data_max.len()
                    ));
                }
                if data_min.iter().chain(data_max).any(|v| !v.is_finite()) {
                    return Err("data_min and data_max must be finite".to_string());
                }
                if let Some(i) = data_min.iter().zip(data_max).position(|(lo, hi)| lo > hi) {
                    return Err(format!("data_min exceeds data_max at column {}", i));
                }
                let (lo, hi) = *feature_range;
                if !(lo < hi) {
                    return Err(format!("feature_range ({}, {}) is empty", lo, hi));
                }
            }
        }

        if self.n_features() == 0 {
            return Err("scaler has no columns".to_string());
        }
        Ok(())
    }

    /// Per-column (offset, divisor, out_scale, out_min) for a single affine pass
    fn affine(&self) -> (Array1<f64>, Array1<f64>, f64, f64) {
        let non_zero = |v: f64| if v == 0.0 { 1.0 } else { v };

        match &self.method {
            ScalingMethod::Standard { mean, scale } => (
                Array1::from(mean.clone()),
                scale.iter().map(|&s| non_zero(s)).collect(),
                1.0,
                0.0,
            ),
            ScalingMethod::MinMax { data_min, data_max, feature_range } => (
                Array1::from(data_min.clone()),
                data_min.iter().zip(data_max).map(|(lo, hi)| non_zero(hi - lo)).collect(),
                feature_range.1 - feature_range.0,
                feature_range.0,
            ),
        }
    }
}

impl Transformer for Scaler {
    fn n_features(&self) -> usize {
        match &self.method {
            ScalingMethod::Standard { mean, .. } => mean.len(),
            ScalingMethod::MinMax { data_min, .. } => data_min.len(),
        }
    }

    fn transform(&self, rows: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        if rows.ncols() != self.n_features() {
            return Err(InferenceError::WidthMismatch {
                stage: "scaler",
                expected: self.n_features(),
                actual: rows.ncols(),
            });
        }

        let (offset, divisor, out_scale, out_min) = self.affine();
        let scaled = (&rows - &offset) / &divisor;
        Ok(scaled * out_scale + out_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let scaler = Scaler::standard(vec![7.0, 200.0], vec![2.0, 50.0]);
        let out = scaler.transform(array![[9.0, 100.0]].view()).unwrap();
        assert_eq!(out, array![[1.0, -2.0]]);
    }

    #[test]
    fn test_zero_scale_passes_through() {
        let scaler = Scaler::standard(vec![1.0], vec![0.0]);
        let out = scaler.transform(array![[4.0]].view()).unwrap();
        assert_eq!(out, array![[3.0]]);
    }

    #[test]
    fn test_min_max_scaler() {
        let scaler = Scaler::min_max(vec![0.0, 10.0], vec![14.0, 20.0]);
        let out = scaler.transform(array![[7.0, 25.0]].view()).unwrap();
        assert_eq!(out, array![[0.5, 1.5]]);

        let mut ranged = Scaler::min_max(vec![0.0], vec![10.0]);
        ranged.method = ScalingMethod::MinMax {
            data_min: vec![0.0],
            data_max: vec![10.0],
            feature_range: (-1.0, 1.0),
        };
        let out = ranged.transform(array![[5.0]].view()).unwrap();
        assert_eq!(out, array![[0.0]]);
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = Scaler::standard(vec![0.0; 3], vec![1.0; 3]);
        let err = scaler.transform(array![[1.0, 2.0]].view()).unwrap_err();
        assert_eq!(err.to_string(), "scaler expects 3 features, got 2");
    }

    #[test]
    fn test_validate() {
        assert!(Scaler::standard(vec![0.0, 1.0], vec![1.0, 1.0]).validate().is_ok());
        assert!(Scaler::standard(vec![0.0, 1.0], vec![1.0]).validate().is_err());
        assert!(Scaler::standard(vec![f64::NAN], vec![1.0]).validate().is_err());
        assert!(Scaler::standard(vec![], vec![]).validate().is_err());
        assert!(Scaler::min_max(vec![5.0], vec![1.0]).validate().is_err());
    }

    #[test]
    fn test_deserialize_json() {
        let json = r#"{
            "kind": "standard",
            "mean": [7.0, 196.3],
            "scale": [1.5, 32.8],
            "feature_names_in": ["ph", "Hardness"]
        }"#;
        let scaler: Scaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.kind(), "standard");
        assert_eq!(scaler.n_features(), 2);
        assert_eq!(scaler.feature_names_in.as_deref().map(|n| n.len()), Some(2));

        let json = r#"{"kind": "min_max", "data_min": [0.0], "data_max": [14.0]}"#;
        let scaler: Scaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.kind(), "min_max");
        assert!(scaler.feature_names_in.is_none());
    }
}
