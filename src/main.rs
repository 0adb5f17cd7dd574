mod config;
mod routes;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    tracing::debug!(?config, "Configuration loaded");

    let state = AppState::new(config)?;
    let config = state.config.clone();

    // Refuse to start if the schedule cannot be fetched and parsed
    if !config.skip_self_test {
        tracing::info!(url = %config.schedule_url, "Testing if able to download and parse schedule");
        match state.upstream.fetch_calendar().await {
            Ok(calendar) => {
                tracing::info!(events = calendar.events().count(), "Schedule OK");
            }
            Err(e) => {
                tracing::error!(error = %e, "Startup check failed, not starting listener");
                return Err(e).with_context(|| format!("Startup check failed for {}", config.schedule_url));
            }
        }
    }

    let app = routes::app(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_address))?;

    tracing::info!(
        listen = %config.listen_address,
        schedule = %config.schedule_url,
        "roomcal listening"
    );
    tracing::info!("Endpoints available:");
    tracing::info!("  http://{}/", config.listen_address);
    tracing::info!("  http://{}/location/<name>", config.listen_address);
    tracing::info!("  http://{}/location/<name>/xml", config.listen_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
