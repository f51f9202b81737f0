//! Confidence band heuristic
//!
//! The reported band is a fixed proportion of the point forecast. It is not
//! derived from residual variance and should be read as an unvalidated
//! heuristic.

use forecast_spi::SalesPrediction;

/// Band width as a fraction of the predicted amount
pub const CONFIDENCE_BAND_RATIO: f64 = 0.15;

/// Width of the confidence band for a point forecast.
///
/// Negative forecasts yield a negative width.
pub fn confidence_interval(predicted_amount: f64) -> f64 {
    predicted_amount * CONFIDENCE_BAND_RATIO
}

/// Pair each requested date with its forecast and band, preserving order
pub fn assemble_predictions<S: AsRef<str>>(
    dates: &[S],
    predictions: &[f64],
) -> Vec<SalesPrediction> {
    dates
        .iter()
        .zip(predictions)
        .map(|(date, &predicted_amount)| SalesPrediction {
            date: date.as_ref().to_string(),
            predicted_amount,
            confidence_interval: confidence_interval(predicted_amount),
        })
        .collect()
}
