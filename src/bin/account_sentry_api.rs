//! Account Sentry API Server
//!
//! Checklist scoring plus a server-side proxy for public username lookups,
//! so lookups keep working where a browser would be blocked by CORS.
//!
//! Usage:
//!   cargo run --bin account_sentry_api
//!
//! Environment:
//!   PORT / ACCOUNT_SENTRY_PORT - Server port (default: 8080)
//!   ACCOUNT_SENTRY_HOST        - Server host (default: 0.0.0.0)
//!   ACCOUNT_SENTRY_LOOKUP_URL  - Upstream users-by-name endpoint
//!   RUST_LOG                   - Log level (default: info)

use account_sentry::api::{create_router, handlers::AppState};
use account_sentry::{AppConfig, Checklist, RobloxUsersClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    let users = RobloxUsersClient::with_endpoint(config.lookup_url.clone())?;
    let state = Arc::new(AppState::new(Checklist::builtin()?, users));

    let app = create_router(state.clone());

    let addr: SocketAddr = config.bind_addr().parse()?;

    info!("🛡️ Account Sentry API starting on http://{}", addr);
    info!("   Upstream lookup: {}", config.lookup_url);
    info!("Endpoints:");
    info!("  GET  /v1/checklist  - Indicator checklist");
    info!("  POST /v1/score      - Score checked indicators");
    info!("  POST /v1/lookup     - Public username lookup");
    info!("  GET  /v1/stats      - Request counters");
    info!("  GET  /v1/health     - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 Shutdown signal received");
    info!(
        "   Scores: {}, lookups found: {}, lookups failed: {}",
        state.stats.scores_computed.load(std::sync::atomic::Ordering::Relaxed),
        state.stats.lookups_found.load(std::sync::atomic::Ordering::Relaxed),
        state.stats.lookups_failed.load(std::sync::atomic::Ordering::Relaxed),
    );

    Ok(())
}
