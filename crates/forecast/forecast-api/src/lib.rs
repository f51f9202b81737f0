//! Forecast Consumer API
//!
//! Consumer configurations and builder APIs for the sales forecast model.
//!
//! This crate provides:
//! - [`ArtifactConfig`] describing where the fitted model is persisted
//! - Builders for file-backed and in-memory models
//! - Re-exports from SPI and core for convenience

use std::path::PathBuf;
use std::sync::Arc;

// Re-export from core
pub use forecast_core::{
    assemble_predictions, confidence, confidence_interval, customer, estimate_lifetime_value,
    features, model, regression, scaler, store, FileArtifactStore, InMemoryArtifactStore,
    LinearRegressor, SalesForecastModel, StandardScaler, TrainedModel, CONFIDENCE_BAND_RATIO,
    LIFETIME_HORIZON_PERIODS, LIFETIME_VALUE_CONFIDENCE,
};

// Re-export traits from SPI
pub use forecast_spi::{
    ArtifactBundle, ArtifactStore, CustomerAggregate, FeatureScaler, FeatureVector,
    ForecastError, LifetimeValue, Regressor, Result, SalesPrediction, SalesRecord,
    FEATURE_COUNT,
};

use serde::{Deserialize, Serialize};

/// Default file name of the serialized regressor
pub const DEFAULT_REGRESSOR_FILE: &str = "sales_model.bin";

/// Default file name of the serialized scaler
pub const DEFAULT_SCALER_FILE: &str = "scaler.bin";

/// Location of the persisted model artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory holding both artifact files
    pub directory: PathBuf,
    /// File name of the regressor inside `directory`
    pub regressor_file: String,
    /// File name of the scaler inside `directory`
    pub scaler_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            regressor_file: DEFAULT_REGRESSOR_FILE.to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
        }
    }
}

impl ArtifactConfig {
    /// Default file names inside `directory`
    pub fn in_dir(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn regressor_path(&self) -> PathBuf {
        self.directory.join(&self.regressor_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.directory.join(&self.scaler_file)
    }

    /// File store at the configured paths
    pub fn open_store(&self) -> FileArtifactStore {
        FileArtifactStore::new(self.regressor_path(), self.scaler_path())
    }

    /// Untrained model persisting to the configured paths
    pub fn build_model(&self) -> SalesForecastModel {
        SalesForecastModel::new(Arc::new(self.open_store()))
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ArtifactConfig;
    pub use forecast_core::{
        confidence_interval, estimate_lifetime_value, FileArtifactStore, InMemoryArtifactStore,
        SalesForecastModel,
    };
    pub use forecast_spi::{
        ArtifactStore, CustomerAggregate, FeatureScaler, ForecastError, LifetimeValue,
        Regressor, Result, SalesPrediction, SalesRecord,
    };
}
