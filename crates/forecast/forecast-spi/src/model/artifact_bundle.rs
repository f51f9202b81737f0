//! Serialized model artifacts

/// The two serialized artifacts that make up a trained model.
///
/// Both halves are written and read together; a bundle with only one side
/// filled in is never produced by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBundle {
    /// Encoded regressor
    pub regressor: Vec<u8>,
    /// Encoded feature scaler
    pub scaler: Vec<u8>,
}

impl ArtifactBundle {
    pub fn new(regressor: Vec<u8>, scaler: Vec<u8>) -> Self {
        Self { regressor, scaler }
    }
}
