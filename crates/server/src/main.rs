use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;

use api::{AppState, create_space_router};
use config::ServerConfig;

const CONFIG_FILE: &str = "server.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting tempspace server");
    let config = if Path::new(CONFIG_FILE).exists() {
        info!("loading server config from {CONFIG_FILE}");
        ServerConfig::from_file(CONFIG_FILE)
            .with_context(|| format!("failed to load server config from {CONFIG_FILE}"))?
    } else {
        info!("config file not found, using defaults");
        ServerConfig::default()
    };

    let state = Arc::new(AppState::new(&config));
    let app = Router::new().merge(create_space_router()).with_state(state);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    info!(addr = %config.listen_addr, "server is ready, press Ctrl+C to shut down");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, stopping server");
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
