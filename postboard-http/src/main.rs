// Postboard HTTP server
// Reads POSTBOARD_JWT_SECRET, POSTBOARD_DATA_DIR, HOST and PORT from the environment

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postboard_http::{router, ServerConfig};
use postboard_store::{Postboard, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "postboard_http=debug,postboard_store=info,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing secret is fatal; there is no development fallback
    let store_config = StoreConfig::from_env().context("store configuration")?;
    let server_config = ServerConfig::from_env()?;

    let board = Postboard::open(store_config)
        .await
        .context("opening data directory")?;
    let app = router(board);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Postboard HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Postboard HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
