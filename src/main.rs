//! Packaging Scan Server - Binary Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use packaging_scan::api::{create_router, AppState};
use packaging_scan::{ScanLog, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("packaging_scan=info,scan_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(data_file = %config.store.data_file.display(), "opening scan log");
    let log = Arc::new(ScanLog::open(config.store.clone())?);

    let app = create_router(Arc::new(AppState::new(log)));
    let listener = TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "scan server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("scan server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
