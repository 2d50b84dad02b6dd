//! HTTP API for the Shopfront commerce engine.
//!
//! Wraps a [`Shop`](shopfront_commerce::Shop) in a single async mutex and
//! exposes carts, checkout, discount administration and applicant rules
//! as JSON over axum.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

pub use config::ServerConfig;
pub use error::ApiError;
pub use logging::{init_tracing, LogFormat};
pub use routes::{app, router, with_middleware};
pub use state::AppState;

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let state = AppState::with_discount_every(config.discount_every)
        .context("Invalid discount threshold")?;
    let app = routes::app(state, config);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    info!(
        addr = %local_addr,
        discount_every = config.discount_every,
        cors = config.cors,
        "shopfront listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("shopfront stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
