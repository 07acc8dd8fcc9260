use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};

use deskboard_services::TodoService;

use crate::routes::routes;

/// Serve the API on `addr` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    service: TodoService,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let (bound, server) = warp::serve(routes(service))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .with_context(|| format!("Failed to bind todo API to {}", addr))?;

    tracing::info!("Todo API listening on http://{}", bound);
    server.await;
    tracing::info!("Todo API stopped");

    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
