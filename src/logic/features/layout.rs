//! Feature Layout - Ordered feature name list
//!
//! The layout is loaded once from `feature_names.json` and is the single
//! source of truth for:
//! - which input widgets the form renders
//! - the column order of the row handed to the scaler and the model
//!
//! A CRC32 hash over the ordered names identifies the layout in logs and
//! in the metadata endpoint, so a swapped artifact set is easy to spot.

use std::collections::HashSet;

use crc32fast::Hasher;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("feature name list is empty")]
    Empty,

    #[error("duplicate feature name '{0}'")]
    Duplicate(String),

    #[error("feature name at position {0} is blank")]
    Blank(usize),
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Immutable, ordered list of feature names
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayout {
    names: Vec<String>,
    hash: u32,
}

impl FeatureLayout {
    /// Build a layout, rejecting empty lists, blank names and duplicates
    pub fn new(names: Vec<String>) -> Result<Self, LayoutError> {
        if names.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LayoutError::Blank(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(LayoutError::Duplicate(name.clone()));
            }
        }

        let hash = compute_layout_hash(&names);
        Ok(Self { names, hash })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// CRC32 of the ordered names
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Column index of a feature
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            hash: format!("{:08x}", self.hash),
            feature_count: self.names.len(),
            feature_names: self.names.clone(),
        }
    }
}

/// Hash all names in order, NUL separated
fn compute_layout_hash(names: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Serializable layout summary
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    pub hash: String,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}
