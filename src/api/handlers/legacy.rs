//! Routes kept for clients of the old video-only server.

use crate::api::error::AppError;
use axum::{Json, extract::State};

use super::files::{LegacyFileEntry, LegacyListResponse};

#[utoipa::path(
    get,
    path = "/videos",
    responses(
        (status = 200, description = "Stored files by name", body = LegacyListResponse),
        (status = 404, description = "Storage directory does not exist", body = crate::api::handlers::files::ErrorResponse)
    ),
    tag = "legacy"
)]
pub async fn list_videos(
    State(state): State<crate::AppState>,
) -> Result<Json<LegacyListResponse>, AppError> {
    let records = state.file_service.list_files_legacy().await?;

    let files: Vec<LegacyFileEntry> = records
        .into_iter()
        .map(|record| LegacyFileEntry {
            download_url: record.download_path(),
            size: record.size_bytes,
            filename: record.name,
        })
        .collect();

    Ok(Json(LegacyListResponse {
        directory: state.file_service.storage().location(),
        total_files: files.len(),
        files,
    }))
}
