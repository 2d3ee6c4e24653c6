//! Depot API server binary.

use depot_api::{ApiConfig, ApiError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Depot API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.grpc_port,
        database = %config.database_url,
        "Configuration loaded"
    );

    depot_api::run(config).await
}
