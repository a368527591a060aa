use crate::commands::{Confirmation, log_kick, undo_last};
use crate::errors::AppError;
use crate::models::{ChangesQuery, CommandResponse, DailySummary, Dashboard};
use crate::state::AppState;
use crate::store::{KickStore, next_change};
use crate::summary::{build_dashboard, summarize};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use std::time::Duration;

const LONG_POLL: Duration = Duration::from_secs(25);

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = current_dashboard(&state);
    let undo_available = state.undo.peek().await.is_some();
    Html(render_index(&dashboard, undo_available))
}

pub async fn get_today(State(state): State<AppState>) -> Json<Dashboard> {
    Json(current_dashboard(&state))
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<DailySummary>> {
    Json(summarize(&state.store.snapshot().kicks))
}

/// Waits until the store moves past version `since`, then returns the fresh dashboard.
pub async fn get_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Json<Dashboard> {
    let snapshot = next_change(state.store.subscribe(), query.since, LONG_POLL).await;
    Json(build_dashboard(&snapshot, &state.config))
}

pub async fn log(State(state): State<AppState>) -> Result<Json<CommandResponse>, AppError> {
    let confirmation = log_kick(state.store.as_ref(), &state.undo, Utc::now()).await?;
    Ok(Json(to_response(&state, confirmation)))
}

pub async fn undo(State(state): State<AppState>) -> Result<Json<CommandResponse>, AppError> {
    let confirmation = undo_last(state.store.as_ref(), &state.undo).await?;
    Ok(Json(to_response(&state, confirmation)))
}

pub async fn log_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    log_kick(state.store.as_ref(), &state.undo, Utc::now()).await?;
    Ok(Redirect::to("/"))
}

pub async fn undo_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    undo_last(state.store.as_ref(), &state.undo).await?;
    Ok(Redirect::to("/"))
}

fn current_dashboard(state: &AppState) -> Dashboard {
    build_dashboard(&state.store.snapshot(), &state.config)
}

fn to_response(state: &AppState, confirmation: Confirmation) -> CommandResponse {
    CommandResponse {
        message: confirmation.message.to_string(),
        undo_available: confirmation.undo_available,
        kick_id: confirmation.kick_id,
        dashboard: current_dashboard(state),
    }
}
