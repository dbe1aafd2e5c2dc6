#[macro_use]
extern crate tracing;

use access_log_stats::config::Server;
use access_log_stats::router::build_axum_router;
use access_log_stats::util::tracing::init;
use access_log_stats::{App, AppState, LogStore};
use anyhow::Context;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init();

    let config = Server::from_environment()?;

    let store = LogStore::from_config(&config.log_storage, config.log_cache_dir.as_deref())?;

    let addr = SocketAddr::new(config.ip, config.port);

    let state = AppState::new(App::new(config));

    // The log is loaded in the background so that the server can respond
    // with empty results in the meantime.
    tokio::spawn({
        let state = state.clone();
        async move {
            if let Err(error) = state.refresh(&store).await {
                error!("Failed to compute access log statistics: {error:#}");
            }
        }
    });

    let router = build_axum_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Listening at http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has gracefully shutdown!");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = ctrl_c().await {
        error!("Failed to listen for the shutdown signal: {error}");
        return std::future::pending().await;
    }

    info!("Starting graceful shutdown");
}
