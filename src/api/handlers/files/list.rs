use crate::api::error::AppError;
use crate::models::Category;
use axum::{Json, extract::State};

use super::types::*;

#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Stored files, newest first", body = FileListResponse),
        (status = 500, description = "Storage directory could not be read", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn list_files(
    State(state): State<crate::AppState>,
) -> Result<Json<FileListResponse>, AppError> {
    let records = state.file_service.list_files().await?;

    let files: Vec<FileEntry> = records
        .into_iter()
        .map(|record| {
            let upload_date = state.file_service.display_time(record.modified_at);
            FileEntry::from_record(record, upload_date)
        })
        .collect();

    Ok(Json(FileListResponse {
        total: files.len(),
        files,
    }))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate counters over the storage directory", body = StatsResponse)
    ),
    tag = "files"
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.file_service.compute_stats().await?;
    Ok(Json(stats.into()))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Category table used for classification", body = Vec<CategoryResponse>)
    ),
    tag = "files"
)]
pub async fn list_categories() -> Json<Vec<CategoryResponse>> {
    Json(Category::ALL.into_iter().map(CategoryResponse::from).collect())
}
