//! Predictor Service Provider Interface
//!
//! Defines the contracts, data models and error type shared by every
//! sales regressor implementation:
//!
//! - [`Regressor`]: Scores an aligned feature frame, one value per row
//! - [`RawRow`]: A row of untyped input as it arrives from CSV or a form
//! - [`FeatureFrame`]: Numeric rows laid out in a fixed column order
//! - [`PredictionRecord`]: Input row plus its predicted sales
//! - [`PredictorError`]: Standardized error type for the prediction path

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Regressor;
pub use error::{PredictorError, Result};
pub use model::{FeatureFrame, PredictionRecord, RawRow, PREDICTED_SALES_COLUMN};
