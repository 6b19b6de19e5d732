use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/habits", post(handlers::add_habit))
        .route("/api/completion", post(handlers::set_completion))
        .route("/api/mood", post(handlers::set_mood))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/partner", get(handlers::get_partner))
        .with_state(state)
}
