//! # forecast-server
//!
//! REST API for sales forecasting and customer lifetime value estimation.
//!
//! The forecast model is owned by [`AppState`] and shared between handlers
//! behind a read-write lock: training takes the write lock, prediction reads
//! unless it first has to load persisted artifacts.

use axum::{
    routing::{get, post},
    Router,
};
use forecast_facade::SalesForecastModel;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    model: Arc<RwLock<SalesForecastModel>>,
}

impl AppState {
    pub fn new(model: SalesForecastModel) -> Self {
        Self {
            model: Arc::new(RwLock::new(model)),
        }
    }

    /// Handle to the shared model
    pub fn model(&self) -> &Arc<RwLock<SalesForecastModel>> {
        &self.model
    }
}

/// Build the router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/train", post(routes::train))
        .route("/predict", post(routes::predict))
        .route("/customer-value", post(routes::customer_value))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
