use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::editor::SectionEdit;
use crate::errors::AppError;
use crate::export::typeset;
use crate::layout::RenderedDocument;
use crate::models::resume::Template;
use crate::session::{self, ResumeView, SaveReport};
use crate::state::AppState;
use crate::templates::render;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct RenderQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub template: Template,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeView>, AppError> {
    let view = session::load_record(&state.drafts, &state.remote, params.user_id).await?;
    Ok(Json(view))
}

/// PATCH /api/v1/resume
pub async fn handle_edit_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(edit): Json<SectionEdit>,
) -> Result<Json<ResumeView>, AppError> {
    let view = session::edit_record(&state.drafts, &state.remote, params.user_id, edit).await?;
    Ok(Json(view))
}

/// POST /api/v1/resume/save
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SaveReport>, AppError> {
    let report = session::save_record(&state.drafts, &state.remote, params.user_id).await?;
    Ok(Json(report))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeView>, AppError> {
    let view = session::reset_record(&state.drafts, &state.remote, params.user_id).await?;
    Ok(Json(view))
}

/// GET /api/v1/resume/preview
///
/// A point-in-time snapshot: the document is regenerated on each call, never
/// kept in sync with edits automatically.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<RenderQuery>,
) -> Result<Json<RenderedDocument>, AppError> {
    let view = session::load_record(&state.drafts, &state.remote, params.user_id).await?;
    Ok(Json(render(&view.record, params.template)))
}

/// GET /api/v1/resume/export
pub async fn handle_export(
    State(state): State<AppState>,
    Query(params): Query<RenderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = session::load_record(&state.drafts, &state.remote, params.user_id).await?;
    let document = render(&view.record, params.template);
    let source = typeset(&document);
    let artifact = state.compiler.compile_pdf(&source).await?;

    let filename = format!("resume-{}.pdf", params.template.as_str());
    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        artifact.bytes,
    ))
}
