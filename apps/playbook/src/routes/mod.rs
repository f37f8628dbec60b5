pub mod health;
pub mod page;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interactive page
        .route("/", get(page::handle_index))
        .route("/generate", post(page::handle_generate_form))
        .route("/download", post(page::handle_download))
        .route("/session/reset", post(page::handle_reset))
        // JSON API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", delete(handlers::handle_end_session))
        .route(
            "/api/v1/sessions/:id/playbooks",
            post(handlers::handle_generate),
        )
        .route("/api/v1/sessions/:id/history", get(handlers::handle_history))
        .route("/api/v1/sessions/:id/export", post(handlers::handle_export))
        .with_state(state)
}
