//! Forecast Service Provider Interface
//!
//! Defines the error type, data models and the contracts implemented by the
//! feature scaler, the regressor and the artifact stores.
//!
//! - [`FeatureScaler`]: per-column normalisation fitted on training features
//! - [`Regressor`]: maps scaled feature rows to a predicted amount
//! - [`ArtifactStore`]: persists the fitted scaler and regressor as raw bytes
//! - [`ForecastError`]: error type shared by the whole stack

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ArtifactStore, FeatureScaler, Regressor};
pub use error::{ForecastError, Result};
pub use model::{
    ArtifactBundle, CustomerAggregate, FeatureVector, LifetimeValue, SalesPrediction,
    SalesRecord, FEATURE_COUNT,
};
