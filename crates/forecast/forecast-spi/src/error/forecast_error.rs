//! Forecast error types
//!
//! Defines the standardized error type for feature extraction, model
//! fitting, inference and artifact persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while training, loading or querying the forecast model
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A date (or other scalar input) could not be parsed
    #[error("Failed to parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} records, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Input data has the wrong shape
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A scaler or regressor was used before being fitted
    #[error("Model component must be fitted before use")]
    NotFitted,

    /// Prediction requested with no trained or persisted model available
    #[error("Model is not trained and no persisted artifacts were found")]
    ModelNotReady,

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Reading or writing an artifact file failed
    #[error("Artifact I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding an artifact failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Persisted scaler and regressor do not describe the same feature schema
    #[error("Artifact mismatch: {0}")]
    ArtifactMismatch(String),
}

impl ForecastError {
    /// Whether the error was caused by caller-supplied input rather than
    /// an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ForecastError::Parse { .. }
                | ForecastError::InsufficientData { .. }
                | ForecastError::InvalidData(_)
        )
    }

    /// Shorthand for a date parse failure
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
