mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;
mod users;
mod view;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::LazyPool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::users::store::{PgUserStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting users API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL is connected lazily; a failed warm-up only logs.
    let pool = LazyPool::new(
        config.database_url.clone(),
        config.db_max_connections,
        config.db_acquire_timeout,
    );
    let store = PgUserStore::new(pool);
    if let Err(e) = store.ping().await {
        warn!("Store not reachable at startup, continuing: {e}");
    }

    let state = AppState {
        store: Arc::new(store),
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
