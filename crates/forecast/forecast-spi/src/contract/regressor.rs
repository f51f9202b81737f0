//! Regressor trait

use crate::error::Result;

/// Supervised model mapping feature rows to a scalar target.
pub trait Regressor: Send + Sync {
    /// Fit the model to feature rows `x` and targets `y`
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    /// Predict one value per feature row, preserving order
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Number of features seen during fit, `None` before fitting
    fn n_features(&self) -> Option<usize>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool {
        self.n_features().is_some()
    }
}
