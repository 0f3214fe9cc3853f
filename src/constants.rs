//! Global Constants - Salt Predictor
//!
//! Centralized constants for the prediction page and artifact layout.

// ============================================================================
// ARTIFACTS
// ============================================================================

/// Default artifact directory (relative to the working directory)
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Regression model exported to ONNX, preferred when present
pub const MODEL_ONNX_FILE: &str = "salt_model.onnx";

/// Regression model in the JSON format, used when no ONNX export exists
pub const MODEL_FILE: &str = "salt_model.json";

/// Serialized feature scaler
pub const SCALER_FILE: &str = "scaler.json";

/// Ordered feature name list
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

// ============================================================================
// VERDICT
// ============================================================================

/// Salt concentration (mg/L) at and above which water is not drinkable
pub const DRINKABLE_THRESHOLD_MG_L: f64 = 500.0;

/// Salt concentration (mg/L) shown as 100% on the level indicator
pub const UNSAFE_LIMIT_MG_L: f64 = 1000.0;

// ============================================================================
// FORM
// ============================================================================

/// Number of input columns
pub const FORM_COLUMNS: usize = 3;

/// Initial widget value
pub const INPUT_DEFAULT: f64 = 0.0;

/// Widget step
pub const INPUT_STEP: f64 = 0.01;

// ============================================================================
// CHART
// ============================================================================

/// Entries plotted in the feature overview
pub const CHART_TOP_N: usize = 5;

/// Bar fill color
pub const CHART_BAR_COLOR: &str = "#5DADE2";

/// Chart canvas size in pixels (square)
pub const CHART_SIZE_PX: u32 = 400;
