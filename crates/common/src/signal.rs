//! Shutdown signal helpers shared by binaries and tests.

use tracing::{info, warn};

/// Resolves once Ctrl+C is received.
///
/// If the signal handler cannot be installed the future never resolves, so
/// the server keeps running instead of shutting down immediately.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
