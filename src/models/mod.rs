//! Request and response bodies

pub mod prediction;

pub use prediction::*;
