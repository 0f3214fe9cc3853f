//! Salt Verdict - turns a raw prediction into what the page shows

use serde::Serialize;

use crate::constants::{CHART_TOP_N, DRINKABLE_THRESHOLD_MG_L, UNSAFE_LIMIT_MG_L};
use crate::logic::features::InputRecord;

/// Drinkable strictly below the threshold
pub fn is_drinkable(prediction: f64) -> bool {
    prediction < DRINKABLE_THRESHOLD_MG_L
}

/// Fraction of the unsafe limit, clamped to [0, 1]
pub fn progress_fraction(prediction: f64) -> f64 {
    (prediction / UNSAFE_LIMIT_MG_L).min(1.0).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub feature: String,
    pub value: f64,
}

/// Everything the result section renders
#[derive(Debug, Clone, Serialize)]
pub struct SaltReport {
    pub prediction_mg_l: f64,
    pub drinkable: bool,
    pub progress: f64,
    pub headline: String,
    pub verdict: String,
    pub progress_caption: String,
    pub chart: Vec<ChartEntry>,
}

impl SaltReport {
    pub fn new(prediction: f64, record: &InputRecord) -> Self {
        let drinkable = is_drinkable(prediction);
        let progress = progress_fraction(prediction);

        let verdict = if drinkable {
            "Water is Drinkable"
        } else {
            "Water is Not Drinkable"
        };

        Self {
            prediction_mg_l: prediction,
            drinkable,
            progress,
            headline: format!("Predicted Salt Level: {:.2} mg/L", prediction),
            verdict: verdict.to_string(),
            progress_caption: format!(
                "Salt Concentration Level: {:.1}% of unsafe limit",
                progress * 100.0
            ),
            chart: record
                .head(CHART_TOP_N)
                .iter()
                .map(|(feature, value)| ChartEntry {
                    feature: feature.clone(),
                    value: *value,
                })
                .collect(),
        }
    }
}
