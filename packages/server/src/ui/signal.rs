//! Shutdown signal handling.

/// Resolve when the process receives Ctrl+C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            // Never resolve, keep serving.
            std::future::pending::<()>().await;
        }
    }
}
