pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::gateway::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Anything not matching an API route falls through to the static entry
    // page and its assets (ServeDir serves index.html for directory roots).
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-roadmap",
            post(handlers::handle_generate_roadmap),
        )
        .route("/api/chat", post(handlers::handle_chat))
        .route("/api/analyze-resume", post(handlers::handle_analyze_resume))
        .fallback_service(static_files)
        .with_state(state)
}
