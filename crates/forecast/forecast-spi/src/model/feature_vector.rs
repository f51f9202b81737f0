//! Calendar feature vector

use serde::{Deserialize, Serialize};

/// Number of columns produced for every date
pub const FEATURE_COUNT: usize = 3;

/// Calendar features derived from a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Ordinal day within the year (1-366)
    pub day_of_year: u32,
    /// Month of the year (1-12)
    pub month: u32,
    /// Day of the week, Monday = 0 through Sunday = 6
    pub day_of_week: u32,
}

impl FeatureVector {
    /// Feature row in fixed column order: day of year, month, day of week
    pub fn to_row(&self) -> Vec<f64> {
        vec![
            f64::from(self.day_of_year),
            f64::from(self.month),
            f64::from(self.day_of_week),
        ]
    }
}
