//! YouTrack MCP tool server composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod cli;
mod dto;
mod error;
mod handlers;
mod state;
mod tools;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use youtrack_mcp_core::AppError;
use youtrack_mcp_infrastructure::YouTrackHttpClient;

use crate::api_config::{ApiConfig, init_tracing};
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ApiConfig::load(&cli)?;
    init_tracing(&config.log_level);

    let tracker = Arc::new(YouTrackHttpClient::new(&config.youtrack)?);
    info!(
        base_url = %tracker.base_url(),
        cloud = config.youtrack.is_cloud_instance(),
        verify_ssl = config.youtrack.verify_ssl,
        timeout_secs = config.youtrack.timeout.as_secs(),
        "YouTrack client configured"
    );

    let app_state = api_services::build_app_state(&config, tracker.clone());
    let app = api_router::build_router(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, name = %config.server_name, "youtrack-mcp-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))?;

    drop(tracker);
    info!("YouTrack client released, shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(signal_error) = tokio::signal::ctrl_c().await {
            error!(error = %signal_error, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(signal_error) => {
                error!(error = %signal_error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!("received SIGINT, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
