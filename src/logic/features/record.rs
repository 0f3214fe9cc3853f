//! Input Record - One set of user-entered measurements
//!
//! Built fresh for every prediction request. Entries are always stored in
//! layout order, so insertion order, display order and model column order
//! are the same thing.

use std::collections::HashMap;

use ndarray::Array2;
use thiserror::Error;

use super::layout::FeatureLayout;
use crate::constants::INPUT_DEFAULT;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing value for feature '{0}'")]
    MissingFeature(String),

    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("feature '{0}' was given more than once")]
    DuplicateFeature(String),

    #[error("could not convert '{value}' to a number for feature '{feature}'")]
    InvalidNumber { feature: String, value: String },

    #[error("value for feature '{feature}' must be a finite number, got {value}")]
    NonFinite { feature: String, value: f64 },
}

/// Feature name -> value, in layout order
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    entries: Vec<(String, f64)>,
}

impl InputRecord {
    /// Every feature at the widget default
    pub fn defaults(layout: &FeatureLayout) -> Self {
        Self {
            entries: layout
                .names()
                .iter()
                .map(|name| (name.clone(), INPUT_DEFAULT))
                .collect(),
        }
    }

    /// Build from name/value pairs in any order.
    ///
    /// The pairs must cover exactly the layout: unknown, duplicate and
    /// missing names are all rejected.
    pub fn from_pairs<I>(layout: &FeatureLayout, pairs: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut slots: Vec<Option<f64>> = vec![None; layout.len()];

        for (name, value) in pairs {
            let index = layout
                .index_of(&name)
                .ok_or_else(|| RecordError::UnknownFeature(name.clone()))?;
            if !value.is_finite() {
                return Err(RecordError::NonFinite { feature: name, value });
            }
            if slots[index].replace(value).is_some() {
                return Err(RecordError::DuplicateFeature(name));
            }
        }

        let entries = layout
            .names()
            .iter()
            .zip(slots)
            .map(|(name, slot)| {
                slot.map(|value| (name.clone(), value))
                    .ok_or_else(|| RecordError::MissingFeature(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Build from a JSON-style map
    pub fn from_map(layout: &FeatureLayout, values: HashMap<String, f64>) -> Result<Self, RecordError> {
        Self::from_pairs(layout, values)
    }

    /// Build from raw form fields, parsing each value as a number
    pub fn from_form(layout: &FeatureLayout, fields: &[(String, String)]) -> Result<Self, RecordError> {
        let parsed = fields
            .iter()
            .map(|(name, raw)| {
                raw.trim()
                    .parse::<f64>()
                    .map(|value| (name.clone(), value))
                    .map_err(|_| RecordError::InvalidNumber {
                        feature: name.clone(),
                        value: raw.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_pairs(layout, parsed)
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `n` entries in insertion order
    pub fn head(&self, n: usize) -> &[(String, f64)] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Single-row matrix (1 x features)
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, self.entries.len()), |(_, j)| self.entries[j].1)
    }
}
