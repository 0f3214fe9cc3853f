//! Salt Regression Model
//!
//! `linear`: `row . coefficients + intercept`
//!
//! `forest`: mean of regression trees. Trees use flat parallel arrays
//! (`children_left`, `children_right`, `feature`, `threshold`, `value`);
//! a leaf has both children set to -1 and a split sends a row left when
//! `row[feature] <= threshold`.

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::Deserialize;

use super::inference::{InferenceError, Regressor};

const LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    /// Every child index must point strictly forward, which rules out cycles
    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.value.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("tree arrays differ in length".to_string());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);

            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {} has only one child", node));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {} has a non-finite value", node));
                }
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has invalid child index {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {} has a NaN threshold", node));
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// Model artifact as stored in `salt_model.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SaltModel {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        n_features: usize,
        trees: Vec<RegressionTree>,
    },
}

impl SaltModel {
    pub fn kind(&self) -> &'static str {
        match self {
            SaltModel::Linear { .. } => "linear",
            SaltModel::Forest { .. } => "forest",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            SaltModel::Linear { coefficients, intercept } => {
                if coefficients.is_empty() {
                    return Err("linear model has no coefficients".to_string());
                }
                if coefficients.iter().chain(std::iter::once(intercept)).any(|v| !v.is_finite()) {
                    return Err("coefficients and intercept must be finite".to_string());
                }
            }
            SaltModel::Forest { n_features, trees } => {
                if *n_features == 0 {
                    return Err("forest has no input features".to_string());
                }
                if trees.is_empty() {
                    return Err("forest has no trees".to_string());
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(*n_features).map_err(|e| format!("tree {}: {}", i, e))?;
                }
            }
        }
        Ok(())
    }
}

impl Regressor for SaltModel {
    fn n_features(&self) -> usize {
        match self {
            SaltModel::Linear { coefficients, .. } => coefficients.len(),
            SaltModel::Forest { n_features, .. } => *n_features,
        }
    }

    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        if rows.ncols() != self.n_features() {
            return Err(InferenceError::WidthMismatch {
                stage: "model",
                expected: self.n_features(),
                actual: rows.ncols(),
            });
        }

        match self {
            SaltModel::Linear { coefficients, intercept } => {
                let weights = ArrayView1::from(coefficients.as_slice());
                Ok(rows.dot(&weights) + *intercept)
            }
            SaltModel::Forest { trees, .. } => Ok(rows
                .rows()
                .into_iter()
                .map(|row| {
                    let total: f64 = trees.iter().map(|tree| tree.predict_row(row)).sum();
                    total / trees.len() as f64
                })
                .collect()),
        }
    }
}
