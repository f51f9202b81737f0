//! Integration tests for the forecast components
//!
//! Checks that the building blocks compose into the same result as the model.

use forecast_facade::features::{extract_features, feature_rows};
use forecast_facade::{
    FeatureScaler, LinearRegressor, Regressor, SalesForecastModel, SalesRecord, StandardScaler,
    FEATURE_COUNT,
};

fn sample_records() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new("2024-01-05", 210.0),
        SalesRecord::new("2024-01-19", 190.0),
        SalesRecord::new("2024-02-14", 320.0),
        SalesRecord::new("2024-03-03", 150.0),
        SalesRecord::new("2024-04-18", 260.0),
        SalesRecord::new("2024-05-27", 240.0),
        SalesRecord::new("2024-07-04", 400.0),
        SalesRecord::new("2024-08-11", 180.0),
        SalesRecord::new("2024-11-29", 520.0),
        SalesRecord::new("2024-12-24", 610.0),
    ]
}

#[test]
fn test_manual_pipeline_matches_model() {
    let records = sample_records();
    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();

    let rows = feature_rows(&dates).unwrap();
    let mut scaler = StandardScaler::new();
    let scaled = scaler.fit_transform(&rows).unwrap();
    let mut regressor = LinearRegressor::new();
    regressor.fit(&scaled, &amounts).unwrap();

    let query = feature_rows(&["2025-01-15", "2025-10-31"]).unwrap();
    let manual = regressor.predict(&scaler.transform(&query).unwrap()).unwrap();

    let mut model = SalesForecastModel::in_memory();
    model.train(&records).unwrap();
    let via_model = model.predict(&["2025-01-15", "2025-10-31"]).unwrap();

    assert_eq!(manual, via_model);
}

#[test]
fn test_trained_components_share_feature_schema() {
    let mut model = SalesForecastModel::in_memory();
    model.train(&sample_records()).unwrap();

    let trained = model.trained().unwrap();
    assert_eq!(trained.scaler().n_features(), Some(FEATURE_COUNT));
    assert_eq!(trained.regressor().n_features(), Some(FEATURE_COUNT));
    assert_eq!(trained.regressor().n_observations(), 10);
}

#[test]
fn test_scaled_training_features_are_standardized() {
    let dates: Vec<String> = sample_records().into_iter().map(|r| r.date).collect();
    let rows = feature_rows(&dates).unwrap();

    let mut scaler = StandardScaler::new();
    let scaled = scaler.fit_transform(&rows).unwrap();

    for c in 0..FEATURE_COUNT {
        let mean = scaled.iter().map(|r| r[c]).sum::<f64>() / scaled.len() as f64;
        assert!(mean.abs() < 1e-9, "column {c} mean {mean}");
    }
}

#[test]
fn test_features_match_calendar() {
    let fvs = extract_features(&["2024-07-04", "2024-11-29"]).unwrap();

    // Thursday and Friday
    assert_eq!(fvs[0].day_of_week, 3);
    assert_eq!(fvs[1].day_of_week, 4);
    assert_eq!(fvs[0].day_of_year, 186);
    assert_eq!(fvs[1].month, 11);
}

#[test]
fn test_predictions_finite_for_training_dates() {
    let records = sample_records();
    let mut model = SalesForecastModel::in_memory();
    model.train(&records).unwrap();

    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    let out = model.predict(&dates).unwrap();
    assert_eq!(out.len(), records.len());
    assert!(out.iter().all(|p| p.is_finite()));
}
