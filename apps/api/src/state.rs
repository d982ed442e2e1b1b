use sqlx::PgPool;

use crate::analysis::AnalysisService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub analysis: AnalysisService,
    pub config: Config,
}
