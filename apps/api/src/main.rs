mod catalog;
mod config;
mod errors;
mod extraction;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::JsonFileCatalog;
use crate::config::Config;
use crate::matching::engine::RankingEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shortlist API v{}", env!("CARGO_PKG_VERSION"));

    // Load the posting catalog once; it is read-only for the life of the process
    let catalog = JsonFileCatalog::load(&config.catalog_path).await?;

    let engine = RankingEngine::default();
    info!(
        "Ranking engine: similarity weight {}, vocabulary cap {}",
        engine.blend.similarity, engine.vector_space.max_features
    );
    if let Some(seed) = config.rank_seed {
        info!("Tie-break generator seeded with {seed}");
    }

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        engine: Arc::new(engine),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
