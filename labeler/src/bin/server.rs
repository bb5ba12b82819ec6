//! Web UI binary for browser-driven label printing.
//!
//! Starts the axum server and signal handling; the CLI binary covers
//! terminal workflows.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ql_labeler::app::SharedState;
use ql_labeler::config::AppConfig;
use ql_labeler::server;
use ql_labeler::services::log_buffer::LogCaptureLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(LogCaptureLayer::new())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(port = config.server_port, "starting label server");

    let font = label_engine::font::load_system_font()?;
    let state = SharedState::new(config, font);

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("server failed: {e}");
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    server_handle.abort();
    Ok(())
}
