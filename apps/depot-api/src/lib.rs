//! # Depot API
//!
//! gRPC server for inventory master data.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot API Server                               │
//! │                                                                         │
//! │  Client ───► gRPC (50051) ───► depot-service ───► depot-db ───► SQLite  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod proto;
pub mod services;

use std::net::SocketAddr;

use depot_db::{migrations, Database};
use depot_service::InventoryServices;
use tonic::transport::Server;
use tracing::{info, warn};

pub use config::ApiConfig;
pub use error::ApiError;

use crate::proto::inventory_service_server::InventoryServiceServer;
use crate::services::InventoryServiceImpl;

/// Opens storage, serves the inventory service and returns after a graceful
/// shutdown.
pub async fn run(config: ApiConfig) -> Result<(), ApiError> {
    let db = Database::new(config.db_config()).await?;
    if !db.health_check().await {
        return Err(ApiError::Unavailable("database is not reachable".to_string()));
    }

    let (known, applied) = migrations::migration_status(db.pool()).await?;
    info!(applied, known, "Database ready");

    let services = InventoryServices::from_database(&db);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.grpc_port).parse()?;
    info!(%addr, timeout_secs = config.request_timeout_secs, "Starting gRPC server");

    Server::builder()
        .timeout(config.request_timeout())
        .add_service(InventoryServiceServer::new(InventoryServiceImpl::new(services)))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
