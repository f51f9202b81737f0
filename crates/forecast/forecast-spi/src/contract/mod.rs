//! Contract module containing trait definitions for forecast operations

mod artifact_store;
mod feature_scaler;
mod regressor;

pub use artifact_store::ArtifactStore;
pub use feature_scaler::FeatureScaler;
pub use regressor::Regressor;
