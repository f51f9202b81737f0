//! # forecast-server
//!
//! Binary entry point: reads configuration, installs tracing and serves the
//! forecast API.

use forecast_server::config::ServerConfig;
use forecast_server::{create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "forecast_server=info,forecast_core=info,tower_http=info".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    let model = config.artifacts.build_model();
    tracing::info!(
        regressor = %config.artifacts.regressor_path().display(),
        scaler = %config.artifacts.scaler_path().display(),
        "model artifacts location"
    );

    let app = create_router(AppState::new(model));

    tracing::info!("forecast-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
