//! Predictor Core
//!
//! Core implementations for the sales regressor serving path:
//!
//! - [`schema`]: The fixed 20-column feature contract and its categorical fields
//! - [`features`]: Reshapes raw rows into that contract (one-hot + zero fill)
//! - [`gbm`]: Gradient-boosted tree ensemble loaded from a JSON dump
//! - [`scoring`]: Align, predict and round in one call

pub mod features;
pub mod gbm;
pub mod schema;
pub mod scoring;

// Re-export SPI items for implementations
pub use predictor_spi::{
    FeatureFrame, PredictionRecord, PredictorError, RawRow, Regressor, Result,
    PREDICTED_SALES_COLUMN,
};

// Re-export main types
pub use features::FeatureAligner;
pub use gbm::TreeEnsemble;
pub use schema::{CategoricalField, FeatureSchema};
pub use scoring::{predict_records, round_to_cents};
