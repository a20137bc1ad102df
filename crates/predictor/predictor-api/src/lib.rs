//! Predictor Consumer API
//!
//! Configuration types and the [`SalesPredictor`] entry point that bundles
//! the feature aligner with a loaded regressor.
//!
//! This crate provides:
//! - [`RegressorConfig`] for locating the model artifact and schema
//! - [`SalesPredictor`] for turning raw rows into prediction records
//! - Re-exports from SPI and core for convenience

// Re-export from core
pub use predictor_core::{
    features, gbm, predict_records, round_to_cents, schema, scoring, CategoricalField,
    FeatureAligner, FeatureSchema, TreeEnsemble,
};

// Re-export traits and models from SPI
pub use predictor_spi::{
    FeatureFrame, PredictionRecord, PredictorError, RawRow, Regressor, Result,
    PREDICTED_SALES_COLUMN,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default artifact location, relative to the working directory
pub const DEFAULT_REGRESSOR_PATH: &str = "models/xgb_model.json";

/// Configuration for loading the sales regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorConfig {
    /// Path to the tree ensemble JSON
    pub model_path: PathBuf,
    /// Column contract the model was trained on
    pub schema: FeatureSchema,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_REGRESSOR_PATH),
            schema: FeatureSchema::sales(),
        }
    }
}

impl RegressorConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            ..Self::default()
        }
    }

    /// Use a different feature schema
    pub fn with_schema(mut self, schema: FeatureSchema) -> Self {
        self.schema = schema;
        self
    }
}

/// Feature aligner paired with a read-only regressor
pub struct SalesPredictor {
    aligner: FeatureAligner,
    model: Box<dyn Regressor>,
}

impl fmt::Debug for SalesPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesPredictor")
            .field("aligner", &self.aligner)
            .field("features", &self.model.feature_names().len())
            .finish()
    }
}

impl SalesPredictor {
    pub fn new(aligner: FeatureAligner, model: impl Regressor + 'static) -> Self {
        Self {
            aligner,
            model: Box::new(model),
        }
    }

    /// Load the tree ensemble named by `config`
    pub fn from_config(config: &RegressorConfig) -> Result<Self> {
        let model = TreeEnsemble::load(&config.model_path, config.schema.columns())?;
        Ok(Self::new(FeatureAligner::new(config.schema.clone()), model))
    }

    pub fn aligner(&self) -> &FeatureAligner {
        &self.aligner
    }

    pub fn feature_names(&self) -> &[String] {
        self.model.feature_names()
    }

    /// Score raw rows; each record carries its input and rounded prediction
    pub fn predict(&self, rows: Vec<RawRow>) -> Result<Vec<PredictionRecord>> {
        let records = predict_records(&self.aligner, self.model.as_ref(), rows)?;
        tracing::debug!(rows = records.len(), "scored rows");
        Ok(records)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{RegressorConfig, SalesPredictor, DEFAULT_REGRESSOR_PATH};
    pub use predictor_core::{
        round_to_cents, FeatureAligner, FeatureSchema, TreeEnsemble,
    };
    pub use predictor_spi::{
        FeatureFrame, PredictionRecord, PredictorError, RawRow, Regressor, Result,
    };
}
