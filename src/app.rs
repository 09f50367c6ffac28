use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/joints", get(handlers::get_joints))
        .route("/api/bodymap", get(handlers::get_body_part))
        .route(
            "/api/symptoms",
            get(handlers::list_symptoms).post(handlers::add_symptom),
        )
        .route(
            "/api/journal",
            get(handlers::list_journal).post(handlers::add_journal),
        )
        .route("/api/meds", get(handlers::list_meds).post(handlers::add_medication))
        .route("/api/history", get(handlers::get_history))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/export", get(handlers::get_export))
        .with_state(state)
}
