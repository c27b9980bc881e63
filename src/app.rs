use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/records", post(handlers::submit_form))
        .route("/api/records", post(handlers::submit))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
