use tokio::signal;

/// Resolves once the process receives Ctrl+C or SIGTERM.
///
/// Used as the graceful-shutdown trigger for the HTTP server; a failure to
/// install a handler is logged and treated as a shutdown request.
pub async fn wait_for_shutdown() {
    tokio::select! {
        _ = wait_ctrl_c() => {},
        _ = wait_sigterm() => {},
    }

    tracing::info!("Shutdown signal received, initiating graceful shutdown");
}

async fn wait_ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C signal"),
        Err(e) => tracing::error!(%e, "Error handling Ctrl+C signal"),
    }
}

#[cfg(unix)]
async fn wait_sigterm() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut handler) => {
            handler.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        Err(e) => tracing::error!(%e, "Failed to install SIGTERM handler"),
    }
}

#[cfg(not(unix))]
async fn wait_sigterm() {
    std::future::pending::<()>().await
}
