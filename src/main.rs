use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use streamfit::{
    api::{create_router, AppState},
    config::Config,
    services::context::load_context,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    setup_tracing(&config)?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        mode = ?config.similarity_mode,
        "Building recommender index"
    );

    // Build the index once before accepting traffic
    let sources = config.catalog_sources();
    let context = load_context(&sources, config.similarity_mode)
        .await
        .context("failed to build recommender index")?;

    let state = AppState::new(context, sources, config.similarity_mode);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}

fn setup_tracing(config: &Config) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init tracing subscriber: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
