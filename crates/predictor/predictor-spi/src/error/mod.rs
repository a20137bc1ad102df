//! Error types for prediction operations

mod predictor_error;

pub use predictor_error::{PredictorError, Result};
