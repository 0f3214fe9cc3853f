//! Features Module - Feature layout and per-request input records

pub mod layout;
pub mod record;

pub use layout::{FeatureLayout, LayoutError, LayoutInfo};
pub use record::{InputRecord, RecordError};
