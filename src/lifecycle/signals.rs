//! OS signal handling.
//!
//! Ctrl+C stops the foreground server; nothing else is trapped.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, then trigger `shutdown`.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => {
            // Without a handler the server simply runs until killed.
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
        }
    }
}
