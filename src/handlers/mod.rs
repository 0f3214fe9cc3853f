//! HTTP handlers

pub mod health;
pub mod form;
pub mod predict;
pub mod features;

#[cfg(test)]
mod tests;
