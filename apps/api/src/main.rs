mod analysis;
mod auth;
mod config;
mod db;
mod errors;
mod extractor;
mod linkedin;
mod models;
mod providers;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and seed the default account
    let pool = create_pool(&config.database_url).await?;
    auth::users::ensure_default_user(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("failed to seed default user: {e}"))?;

    // Periodic cleanup of expired tokens, off the request path
    auth::tokens::spawn_sweeper(pool.clone());

    // Initialize the analysis service
    let service = AnalysisService::from_config(&config)?;
    info!("Analysis service initialized (provider: {})", service.provider());

    let state = AppState {
        db: pool,
        analysis: service,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
