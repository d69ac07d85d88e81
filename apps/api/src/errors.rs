#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::clients::ApiError;
use crate::draft::DraftError;
use crate::editor::EditError;
use crate::export::RenderError;
use crate::sync::SyncError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    #[error("Draft store error: {0}")]
    Draft(#[from] DraftError),

    #[error("Portal API error: {0}")]
    Portal(#[from] ApiError),

    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Edit(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EDIT_REJECTED",
                e.to_string(),
            ),
            AppError::Draft(e) => {
                tracing::error!("Draft store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DRAFT_ERROR",
                    "The draft store is unavailable".to_string(),
                )
            }
            AppError::Portal(e) => {
                tracing::error!("Portal API error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PORTAL_ERROR",
                    "The career portal could not be reached".to_string(),
                )
            }
            AppError::Sync(e) => {
                tracing::error!("Sync error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SYNC_FAILED",
                    // One aggregate notification per save, never per item.
                    format!(
                        "Saving {} failed; your local edits are preserved, retry the save",
                        e.kind
                    ),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "RENDER_ERROR",
                    "Document rendering failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
