//! HTTP server bootstrap.

use crate::api::{handlers::SharedService, router};
use crate::infrastructure::config::ServerSettings;
use crate::task::ports::TaskRepository;
use anyhow::Context;
use mockable::Clock;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds the configured address and serves the task API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid, cannot be bound, or the
/// server fails while running.
pub async fn run_server<R, C>(config: &ServerSettings, service: SharedService<R, C>) -> anyhow::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    serve(listener, service, shutdown_signal()).await
}

/// Serves the task API on an already bound listener until `shutdown`
/// resolves.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve<R, C, S>(
    listener: TcpListener,
    service: SharedService<R, C>,
    shutdown: S,
) -> anyhow::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "task API listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("task API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
