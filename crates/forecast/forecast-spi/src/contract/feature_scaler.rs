//! Feature scaler trait

use crate::error::Result;

/// Column-wise feature normalisation.
///
/// A scaler learns its parameters once with [`fit`](FeatureScaler::fit) and
/// then only applies them with [`transform`](FeatureScaler::transform); the
/// same fitted parameters must be used for training and inference.
pub trait FeatureScaler: Send + Sync {
    /// Learn per-column parameters from feature rows
    fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()>;

    /// Apply the learned parameters to feature rows
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Fit and transform in one step
    fn fit_transform(&mut self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(rows)?;
        self.transform(rows)
    }

    /// Number of columns seen during fit, `None` before fitting
    fn n_features(&self) -> Option<usize>;

    /// Check if the scaler has been fitted
    fn is_fitted(&self) -> bool {
        self.n_features().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    /// Mock implementation: shifts every column by its mean
    struct MeanShift {
        means: Option<Vec<f64>>,
    }

    impl FeatureScaler for MeanShift {
        fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
            let width = rows.first().map(Vec::len).unwrap_or(0);
            let n = rows.len() as f64;
            let means = (0..width)
                .map(|c| rows.iter().map(|r| r[c]).sum::<f64>() / n)
                .collect();
            self.means = Some(means);
            Ok(())
        }

        fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
            let means = self.means.as_ref().ok_or(ForecastError::NotFitted)?;
            Ok(rows
                .iter()
                .map(|r| r.iter().zip(means).map(|(x, m)| x - m).collect())
                .collect())
        }

        fn n_features(&self) -> Option<usize> {
            self.means.as_ref().map(Vec::len)
        }
    }

    #[test]
    fn test_transform_without_fit() {
        let scaler = MeanShift { means: None };
        assert!(!scaler.is_fitted());
        assert!(matches!(
            scaler.transform(&[vec![1.0]]),
            Err(ForecastError::NotFitted)
        ));
    }

    #[test]
    fn test_default_fit_transform() {
        let mut scaler = MeanShift { means: None };
        let out = scaler
            .fit_transform(&[vec![1.0, 10.0], vec![3.0, 30.0]])
            .unwrap();
        assert_eq!(out, vec![vec![-1.0, -10.0], vec![1.0, 10.0]]);
        assert_eq!(scaler.n_features(), Some(2));
        assert!(scaler.is_fitted());
    }

    #[test]
    fn test_scaler_as_trait_object() {
        let mut scaler: Box<dyn FeatureScaler> = Box::new(MeanShift { means: None });
        scaler.fit(&[vec![2.0], vec![4.0]]).unwrap();
        assert_eq!(scaler.transform(&[vec![3.0]]).unwrap(), vec![vec![0.0]]);
    }
}
