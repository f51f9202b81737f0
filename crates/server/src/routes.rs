//! API route handlers

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use forecast_facade::{
    estimate_lifetime_value, CustomerAggregate, LifetimeValue, SalesPrediction, SalesRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrainRequest {
    #[serde(default)]
    pub sales_data: Vec<SalesRecord>,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerValueRequest {
    #[serde(default)]
    pub customer_data: CustomerAggregate,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Fit the model on historical sales and persist it
pub async fn train(
    State(state): State<AppState>,
    payload: Result<Json<TrainRequest>, JsonRejection>,
) -> Result<Json<TrainResponse>, ApiError> {
    let Json(req) = payload?;
    let records = req.sales_data;
    tracing::info!(records = records.len(), "training request");

    let mut model = state.model().clone().write_owned().await;
    tokio::task::spawn_blocking(move || model.train(&records)).await??;

    Ok(Json(TrainResponse {
        message: "Model trained successfully".to_string(),
    }))
}

/// Predict sales for the requested dates
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Vec<SalesPrediction>>, ApiError> {
    let Json(req) = payload?;
    tracing::debug!(dates = req.dates.len(), "prediction request");

    {
        let model = state.model().read().await;
        if model.is_trained() {
            return Ok(Json(model.forecast_ready(&req.dates)?));
        }
    }

    // First prediction since start-up: load persisted artifacts under the write lock
    let mut model = state.model().clone().write_owned().await;
    let dates = req.dates;
    let predictions = tokio::task::spawn_blocking(move || model.forecast(&dates)).await??;
    Ok(Json(predictions))
}

/// Estimate customer lifetime value
pub async fn customer_value(
    payload: Result<Json<CustomerValueRequest>, JsonRejection>,
) -> Result<Json<LifetimeValue>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(estimate_lifetime_value(&req.customer_data)))
}
