pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::auth::handlers as auth_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Analysis API
        .route("/api/analyze", post(analysis_handlers::handle_analyze))
        .route(
            "/api/analyze/linkedin",
            post(analysis_handlers::handle_analyze_profile),
        )
        // Auth API
        .route("/api/auth/register", post(auth_handlers::handle_register))
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route("/api/auth/logout", post(auth_handlers::handle_logout))
        .route("/api/auth/validate", get(auth_handlers::handle_validate))
        .with_state(state)
}
