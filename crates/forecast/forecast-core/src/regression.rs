//! Multiple linear regression
//!
//! Ordinary least squares with an intercept over any number of features.
//!
//! ## Method
//!
//! The features and target are centred, the normal equations
//! `(XᵀX)β = Xᵀy` are solved by Gauss-Jordan elimination with partial
//! pivoting, and the intercept is recovered as `ȳ - x̄·β`. Columns whose
//! pivot vanishes (constant or perfectly collinear columns) are left out of
//! the basis and receive a zero coefficient, so rank-deficient training sets
//! still produce a least-squares fit.

use crate::scaler::row_width;
use forecast_spi::{ForecastError, Regressor, Result};
use serde::{Deserialize, Serialize};

/// Relative pivot magnitude below which a column is treated as dependent
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Ordinary least squares linear regressor
///
/// # Example
///
/// ```rust
/// use forecast_core::LinearRegressor;
/// use forecast_core::Regressor;
///
/// let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
/// let y = vec![1.0, 3.0, 5.0, 7.0];
///
/// let mut model = LinearRegressor::new();
/// model.fit(&x, &y).unwrap();
///
/// let forecast = model.predict(&[vec![4.0]]).unwrap();
/// assert!((forecast[0] - 9.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    /// One weight per feature column
    coefficients: Vec<f64>,
    /// Y-intercept
    intercept: f64,
    /// R-squared on the training data
    r_squared: f64,
    /// Number of observations used in fitting
    n_observations: usize,
    /// Whether model has been fitted
    fitted: bool,
}

impl LinearRegressor {
    /// Create an unfitted regressor
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the fitted coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Get the intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Get R-squared (coefficient of determination) on the training data
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Number of rows the model was fitted on
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, beta)| x * beta)
                .sum::<f64>()
    }
}

/// Solve the symmetric system `a·β = b` (row-major `a`, `p × p`).
///
/// Dependent columns are skipped and get a zero coefficient.
fn solve_normal_equations(a: &[f64], b: &[f64], p: usize) -> Vec<f64> {
    let mut m: Vec<Vec<f64>> = (0..p)
        .map(|i| {
            let mut row = a[i * p..(i + 1) * p].to_vec();
            row.push(b[i]);
            row
        })
        .collect();

    let scale = (0..p)
        .map(|i| a[i * p + i].abs())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let tolerance = SINGULAR_TOLERANCE * scale;

    let mut pivot_of_column: Vec<Option<usize>> = vec![None; p];
    let mut pivot_row = 0;

    for col in 0..p {
        if pivot_row == p {
            break;
        }

        // Find pivot
        let mut best = pivot_row;
        for r in (pivot_row + 1)..p {
            if m[r][col].abs() > m[best][col].abs() {
                best = r;
            }
        }
        if m[best][col].abs() <= tolerance {
            continue;
        }
        m.swap(pivot_row, best);

        // Scale row
        let pivot = m[pivot_row][col];
        for value in m[pivot_row].iter_mut() {
            *value /= pivot;
        }

        // Eliminate column
        for r in 0..p {
            if r != pivot_row {
                let factor = m[r][col];
                if factor != 0.0 {
                    for c in 0..=p {
                        m[r][c] -= factor * m[pivot_row][c];
                    }
                }
            }
        }

        pivot_of_column[col] = Some(pivot_row);
        pivot_row += 1;
    }

    pivot_of_column
        .iter()
        .map(|row| row.map(|r| m[r][p]).unwrap_or(0.0))
        .collect()
}

impl Regressor for LinearRegressor {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        if y.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if x.len() != y.len() {
            return Err(ForecastError::InvalidData(format!(
                "{} feature rows but {} targets",
                x.len(),
                y.len()
            )));
        }
        let p = row_width(x)?;
        if x.iter().flatten().chain(y).any(|v| !v.is_finite()) {
            return Err(ForecastError::NumericalError(
                "non-finite value in training data".to_string(),
            ));
        }

        // Solve in units of the largest amount; raw sums overflow near f64::MAX
        let y_scale = y.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let y_scale = if y_scale > 0.0 { y_scale } else { 1.0 };
        let y_unit: Vec<f64> = y.iter().map(|v| v / y_scale).collect();

        let n = y.len() as f64;
        let x_mean: Vec<f64> = (0..p)
            .map(|c| x.iter().map(|r| r[c]).sum::<f64>() / n)
            .collect();
        let y_mean = y_unit.iter().sum::<f64>() / n;

        // Centred cross products
        let mut xtx = vec![0.0; p * p];
        let mut xty = vec![0.0; p];
        for (row, &target) in x.iter().zip(&y_unit) {
            let centred: Vec<f64> = row.iter().zip(&x_mean).map(|(v, m)| v - m).collect();
            let dy = target - y_mean;
            for i in 0..p {
                xty[i] += centred[i] * dy;
                for j in 0..p {
                    xtx[i * p + j] += centred[i] * centred[j];
                }
            }
        }

        let unit_coefficients = solve_normal_equations(&xtx, &xty, p);
        let unit_intercept = y_mean
            - unit_coefficients
                .iter()
                .zip(&x_mean)
                .map(|(beta, m)| beta * m)
                .sum::<f64>();

        if !unit_intercept.is_finite() || unit_coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::NumericalError(
                "regression produced non-finite coefficients".to_string(),
            ));
        }

        let coefficients: Vec<f64> = unit_coefficients.iter().map(|c| c * y_scale).collect();
        let intercept = unit_intercept * y_scale;
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::InvalidData(format!(
                "amounts up to {y_scale:e} are too large to fit a finite regression"
            )));
        }

        // Calculate R-squared
        let ss_tot: f64 = y_unit.iter().map(|v| (v - y_mean).powi(2)).sum();
        let ss_res: f64 = x
            .iter()
            .zip(&y_unit)
            .map(|(row, v)| {
                let fitted = unit_intercept
                    + row
                        .iter()
                        .zip(&unit_coefficients)
                        .map(|(x, beta)| x * beta)
                        .sum::<f64>();
                (v - fitted).powi(2)
            })
            .sum();
        self.r_squared = if ss_tot * y_scale * y_scale > 1e-10 {
            1.0 - ss_res / ss_tot
        } else {
            1.0
        };

        self.coefficients = coefficients;
        self.intercept = intercept;
        self.n_observations = y.len();
        self.fitted = true;

        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }

        x.iter()
            .map(|row| {
                if row.len() != self.coefficients.len() {
                    return Err(ForecastError::InvalidData(format!(
                        "regressor was fitted on {} features, got {}",
                        self.coefficients.len(),
                        row.len()
                    )));
                }
                Ok(self.predict_row(row))
            })
            .collect()
    }

    fn n_features(&self) -> Option<usize> {
        self.fitted.then_some(self.coefficients.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_plane() {
        // y = 3 + 2a - b + 0.5c
        let x: Vec<Vec<f64>> = vec![
            vec![1.0, 2.0, 0.0],
            vec![2.0, 1.0, 4.0],
            vec![3.0, 5.0, 1.0],
            vec![4.0, 3.0, 6.0],
            vec![5.0, 8.0, 2.0],
            vec![6.0, 2.0, 3.0],
        ];
        let y: Vec<f64> = x
            .iter()
            .map(|r| 3.0 + 2.0 * r[0] - r[1] + 0.5 * r[2])
            .collect();

        let mut model = LinearRegressor::new();
        model.fit(&x, &y).unwrap();

        assert!((model.intercept() - 3.0).abs() < 1e-9);
        assert!((model.coefficients()[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients()[1] + 1.0).abs() < 1e-9);
        assert!((model.coefficients()[2] - 0.5).abs() < 1e-9);
        assert!((model.r_squared() - 1.0).abs() < 1e-9);
        assert_eq!(model.n_observations(), 6);

        let forecast = model.predict(&[vec![10.0, 0.0, 2.0]]).unwrap();
        assert!((forecast[0] - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_fit_minimises_residuals() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..20)
            .map(|i| 5.0 + 1.5 * i as f64 + if i % 2 == 0 { 0.3 } else { -0.3 })
            .collect();

        let mut model = LinearRegressor::new();
        model.fit(&x, &y).unwrap();

        assert!((model.coefficients()[0] - 1.5).abs() < 0.05);
        assert!(model.r_squared() > 0.99);
    }

    #[test]
    fn test_constant_column_gets_zero_weight() {
        let x = vec![vec![0.0, 1.0], vec![0.0, 2.0], vec![0.0, 3.0]];
        let y = vec![2.0, 4.0, 6.0];

        let mut model = LinearRegressor::new();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.coefficients()[0], 0.0);
        assert!((model.coefficients()[1] - 2.0).abs() < 1e-9);
        assert!(model.intercept().abs() < 1e-9);
    }

    #[test]
    fn test_collinear_columns_still_fit() {
        // second column is an exact multiple of the first
        let x = vec![vec![1.0, 2.0], vec![2.0, 4.0], vec![3.0, 6.0], vec![4.0, 8.0]];
        let y = vec![10.0, 20.0, 30.0, 40.0];

        let mut model = LinearRegressor::new();
        model.fit(&x, &y).unwrap();

        let fitted = model.predict(&x).unwrap();
        for (f, t) in fitted.iter().zip(&y) {
            assert!((f - t).abs() < 1e-8, "{f} vs {t}");
        }
        assert!(model.coefficients().iter().any(|&c| c == 0.0));
    }

    #[test]
    fn test_single_observation_predicts_its_value() {
        let mut model = LinearRegressor::new();
        model.fit(&[vec![1.0, 2.0, 3.0]], &[42.0]).unwrap();

        assert_eq!(model.coefficients(), &[0.0, 0.0, 0.0]);
        let out = model.predict(&[vec![9.0, 9.0, 9.0]]).unwrap();
        assert!((out[0] - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_predictions_can_be_negative() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![10.0, 5.0, 0.0];

        let mut model = LinearRegressor::new();
        model.fit(&x, &y).unwrap();

        let out = model.predict(&[vec![4.0]]).unwrap();
        assert!((out[0] + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LinearRegressor::new();
        assert!(matches!(
            model.predict(&[vec![1.0]]),
            Err(ForecastError::NotFitted)
        ));
        assert_eq!(model.n_features(), None);
    }

    #[test]
    fn test_shape_errors() {
        let mut model = LinearRegressor::new();
        assert!(matches!(
            model.fit(&[vec![1.0]], &[1.0, 2.0]),
            Err(ForecastError::InvalidData(_))
        ));
        assert!(matches!(
            model.fit(&[], &[]),
            Err(ForecastError::InsufficientData { .. })
        ));

        model.fit(&[vec![1.0, 2.0], vec![2.0, 1.0]], &[1.0, 2.0]).unwrap();
        assert_eq!(model.n_features(), Some(2));
        assert!(matches!(
            model.predict(&[vec![1.0]]),
            Err(ForecastError::InvalidData(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let mut model = LinearRegressor::new();
        assert!(matches!(
            model.fit(&[vec![f64::NAN], vec![1.0]], &[1.0, 2.0]),
            Err(ForecastError::NumericalError(_))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_near_max_amounts_fit() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![1.7e308, 1.6e308, 1.5e308];

        let mut model = LinearRegressor::new();
        model.fit(&x, &y).unwrap();

        assert!((model.coefficients()[0] / -1e307 - 1.0).abs() < 1e-9);
        assert!((model.intercept() / 1.7e308 - 1.0).abs() < 1e-9);
        assert!((model.r_squared() - 1.0).abs() < 1e-9);

        let out = model.predict(&[vec![1.0]]).unwrap();
        assert!((out[0] / 1.6e308 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrepresentable_slope_is_invalid_data() {
        // slope of -3.4e308 overflows f64
        let mut model = LinearRegressor::new();
        assert!(matches!(
            model.fit(&[vec![0.0], vec![1.0]], &[1.7e308, -1.7e308]),
            Err(ForecastError::InvalidData(_))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_predict_preserves_order() {
        let mut model = LinearRegressor::new();
        model
            .fit(&[vec![0.0], vec![1.0], vec![2.0]], &[0.0, 1.0, 2.0])
            .unwrap();
        let out = model.predict(&[vec![5.0], vec![-1.0], vec![2.5]]).unwrap();
        assert!((out[0] - 5.0).abs() < 1e-9);
        assert!((out[1] + 1.0).abs() < 1e-9);
        assert!((out[2] - 2.5).abs() < 1e-9);
    }
}
