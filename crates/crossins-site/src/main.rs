//! Cross Insurance site entry point.
//!
//! Loads configuration, builds the CRM client and starts the Axum HTTP
//! server with graceful shutdown. Shutdown cancels the root token, so any
//! page still waiting on the backend ends as cancelled instead of failing.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crossins_site::build_router;
use crossins_site::config::SiteConfig;
use crossins_site::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = SiteConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        api_base_url = %config.api_base_url,
        locale = %config.locale,
        "Cross Insurance site starting"
    );

    let shutdown = CancellationToken::new();
    let bind_addr = config.bind_addr;
    let state = Arc::new(
        AppState::new(config, shutdown.clone()).context("invalid CRM backend configuration")?,
    );

    let app = build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;

    info!(addr = %bind_addr, "site listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    info!("site stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM, then cancel every mount.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    shutdown.cancel();
}
