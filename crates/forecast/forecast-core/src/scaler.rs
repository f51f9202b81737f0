//! Standard scaling of feature columns
//!
//! Zero mean, unit variance per column, using the population variance.
//! Constant columns keep a scale of 1 so they map to zero instead of NaN.

use forecast_spi::{FeatureScaler, ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Standard deviation below which a column is treated as constant
const MIN_SCALE: f64 = 1e-10;

/// Column-wise z-score scaler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column mean
    means: Vec<f64>,
    /// Per-column standard deviation (1.0 for constant columns)
    scales: Vec<f64>,
    /// Whether the scaler has been fitted
    fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-column means learned during fit
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Per-column scales learned during fit
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}

/// Width shared by every row, or an error for ragged input
pub(crate) fn row_width(rows: &[Vec<f64>]) -> Result<usize> {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ForecastError::InvalidData(format!(
            "row {} has {} columns, expected {}",
            i,
            row.len(),
            width
        )));
    }
    Ok(width)
}

impl FeatureScaler for StandardScaler {
    fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        if rows.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let width = row_width(rows)?;
        let n = rows.len() as f64;

        let means: Vec<f64> = (0..width)
            .map(|c| rows.iter().map(|r| r[c]).sum::<f64>() / n)
            .collect();

        let scales = means
            .iter()
            .enumerate()
            .map(|(c, mean)| {
                let variance = rows.iter().map(|r| (r[c] - mean).powi(2)).sum::<f64>() / n;
                let std_dev = variance.sqrt();
                if std_dev < MIN_SCALE {
                    1.0
                } else {
                    std_dev
                }
            })
            .collect();

        self.means = means;
        self.scales = scales;
        self.fitted = true;
        Ok(())
    }

    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }

        rows.iter()
            .map(|row| {
                if row.len() != self.means.len() {
                    return Err(ForecastError::InvalidData(format!(
                        "scaler was fitted on {} features, got {}",
                        self.means.len(),
                        row.len()
                    )));
                }
                Ok(row
                    .iter()
                    .zip(self.means.iter().zip(&self.scales))
                    .map(|(x, (mean, scale))| (x - mean) / scale)
                    .collect())
            })
            .collect()
    }

    fn n_features(&self) -> Option<usize> {
        self.fitted.then_some(self.means.len())
    }
}
