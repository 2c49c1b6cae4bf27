use std::net::SocketAddr;

use anyhow::Context;
use common::storage::{Namespace, build_store};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cms_server::config::AppConfig;
use cms_server::state::AppState;
use cms_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.log_summary();

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    seed::ensure_indexes(&db).await?;

    let media_store = build_store(&config.storage, Namespace::Media)
        .await
        .context("Failed to initialize media storage")?;
    let avatar_store = build_store(&config.storage, Namespace::Avatar)
        .await
        .context("Failed to initialize avatar storage")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        media_store,
        avatar_store,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
