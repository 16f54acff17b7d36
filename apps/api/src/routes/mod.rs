pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

/// Resume uploads are capped at 10 MiB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/matches", post(handlers::handle_match_upload))
        .route("/api/v1/matches/text", post(handlers::handle_match_text))
        .route("/api/v1/catalog/stats", get(handlers::handle_catalog_stats))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
