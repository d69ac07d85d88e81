pub mod health;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).patch(resume::handle_edit_resume),
        )
        .route("/api/v1/resume/save", post(resume::handle_save_resume))
        .route("/api/v1/resume/reset", post(resume::handle_reset_resume))
        .route("/api/v1/resume/preview", get(resume::handle_preview))
        .route("/api/v1/resume/export", get(resume::handle_export))
        .with_state(state)
}
