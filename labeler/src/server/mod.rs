pub mod api;
pub mod router;

use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::app::SharedState;

/// Start the axum HTTP server for the label web UI.
///
/// Binds to localhost only and, unless disabled, opens the default
/// browser shortly after the listener is up.
pub async fn start_server(state: SharedState) -> Result<()> {
    let (port, no_browser) = {
        let config = state.config().await;
        (config.server_port, config.no_browser)
    };
    let app = router::create_router(state);

    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("label server listening on http://{addr}");

    if !no_browser {
        let url = format!("http://{addr}");
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            open_browser(&url).await;
        });
    }

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";

    match tokio::process::Command::new(opener).arg(url).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => warn!(%url, %status, "browser opener exited with failure"),
        Err(e) => warn!(%url, error = %e, "could not open browser"),
    }
}
