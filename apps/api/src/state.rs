use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::matching::engine::RankingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable posting source. Default: JsonFileCatalog loaded at startup.
    pub catalog: Arc<dyn CatalogSource>,
    /// Weights and vector-space settings; the engine itself holds no per-request state.
    pub engine: Arc<RankingEngine>,
}
