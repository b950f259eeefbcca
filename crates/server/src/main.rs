use anyhow::{Context, Result};
use folio_server::{AppState, Config, build_app};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,folio_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::from_config(&config).context("Failed to initialise scraper")?;
    let app = build_app(state, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, static_dir = %config.static_dir.display(), "Server running");
    tracing::info!("API endpoint: http://{}/api/scrape", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
