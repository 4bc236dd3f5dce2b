use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Path, State},
};

use super::types::*;

#[utoipa::path(
    delete,
    path = "/api/files/{filename}",
    params(
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File deleted", body = DeleteResponse),
        (status = 400, description = "Invalid filename", body = ErrorResponse),
        (status = 403, description = "Permission denied", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<crate::AppState>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.file_service.delete_file(&filename).await?;

    Ok(Json(DeleteResponse {
        status: "success".to_string(),
        message: "File deleted successfully".to_string(),
        filename,
    }))
}
