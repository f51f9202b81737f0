//! Forecast Core
//!
//! Core implementations for the sales forecast service: calendar feature
//! extraction, standard scaling, ordinary least squares regression, artifact
//! persistence, the forecast model state machine and the confidence and
//! lifetime value heuristics.

pub mod confidence;
pub mod customer;
pub mod features;
pub mod model;
pub mod regression;
pub mod scaler;
pub mod store;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    ArtifactBundle, ArtifactStore, CustomerAggregate, FeatureScaler, FeatureVector,
    ForecastError, LifetimeValue, Regressor, Result, SalesPrediction, SalesRecord,
    FEATURE_COUNT,
};

// Re-export main types
pub use confidence::{assemble_predictions, confidence_interval, CONFIDENCE_BAND_RATIO};
pub use customer::{
    estimate_lifetime_value, LIFETIME_HORIZON_PERIODS, LIFETIME_VALUE_CONFIDENCE,
};
pub use model::{SalesForecastModel, TrainedModel};
pub use regression::LinearRegressor;
pub use scaler::StandardScaler;
pub use store::{FileArtifactStore, InMemoryArtifactStore};
