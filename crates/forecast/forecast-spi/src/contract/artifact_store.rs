//! Artifact store trait

use crate::error::Result;
use crate::model::ArtifactBundle;

/// Persistence for the serialized scaler and regressor.
///
/// Stores deal in raw bytes only; encoding and schema checks belong to the
/// model that owns the artifacts.
pub trait ArtifactStore: Send + Sync {
    /// Replace the stored artifacts with `bundle`
    fn save(&self, bundle: &ArtifactBundle) -> Result<()>;

    /// Read the stored artifacts, `Ok(None)` when nothing has been saved
    fn load(&self) -> Result<Option<ArtifactBundle>>;

    /// Human-readable location used in log lines
    fn describe(&self) -> String;
}
