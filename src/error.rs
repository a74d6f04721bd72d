//! Error Types
//!
//! All failures surface through [`SequenceError`] and abort the whole
//! operation at the point of detection. Sequence assembly is deterministic,
//! so there is no retry or partial-result path.

use thiserror::Error;

/// Errors that can occur during sequence preparation
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("shape mismatch: expected length {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("class index {value} outside [0, {num_classes})")]
    ClassOutOfRange { value: f64, num_classes: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
