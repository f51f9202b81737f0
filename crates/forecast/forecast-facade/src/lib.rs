//! Forecast Facade
//!
//! High-level API for the sales forecast model. Re-exports all public types
//! from the forecast stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{confidence, customer, features, model, regression, scaler, store};

// Re-export SPI traits
pub use forecast_spi::{ArtifactStore, FeatureScaler, ForecastError, Regressor};
