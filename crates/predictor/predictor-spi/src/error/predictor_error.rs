//! Predictor error types

use thiserror::Error;

/// Result type alias for prediction operations
pub type Result<T> = std::result::Result<T, PredictorError>;

/// Errors that can occur while aligning input or scoring it
#[derive(Error, Debug)]
pub enum PredictorError {
    /// A numeric column held something that is not a number
    #[error("Invalid value for '{column}': {value:?}")]
    InvalidValue { column: String, value: String },

    /// Frame layout does not match the model's feature schema
    #[error("Schema mismatch: model expects {expected} features, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// A tree split refers to a feature outside the schema
    #[error("Unknown feature '{0}' in model")]
    UnknownFeature(String),

    /// Model artifact is structurally invalid
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Model artifact could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
