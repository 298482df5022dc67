pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::canvas::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/canvas/generate", post(handlers::handle_generate))
        .route("/api/v1/canvas/document", post(handlers::handle_document))
        .with_state(state)
}
