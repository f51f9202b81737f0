//! Point forecast for a single date

use serde::{Deserialize, Serialize};

/// Predicted amount for one requested date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPrediction {
    /// The date exactly as supplied by the caller
    pub date: String,
    /// Regression output, unclamped
    pub predicted_amount: f64,
    /// Width of the reported confidence band
    pub confidence_interval: f64,
}
