use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/kick/log", post(handlers::log_form))
        .route("/kick/undo", post(handlers::undo_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/history", get(handlers::get_history))
        .route("/api/changes", get(handlers::get_changes))
        .route("/api/kick", post(handlers::log))
        .route("/api/undo", post(handlers::undo))
        .with_state(state)
}
