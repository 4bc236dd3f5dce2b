use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use futures::TryStreamExt;
use std::io;

use super::types::*;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Body errors surface through the storage write; the kind decides the
/// status code later on.
fn multipart_io_error(e: MultipartError) -> io::Error {
    let kind = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        io::ErrorKind::FileTooLarge
    } else {
        io::ErrorKind::InvalidData
    };
    io::Error::new(kind, e.body_text())
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Multipart, description = "Multipart form with a single `file` field"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "Missing file, empty name or unsupported type", body = ErrorResponse),
        (status = 413, description = "File exceeds the maximum upload size", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let result = async {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some("file") {
                continue;
            }
            // A `file` part without a filename is a plain form value
            let Some(original_name) = field.file_name().map(|s| s.to_string()) else {
                continue;
            };

            let body = field.map_err(multipart_io_error);
            let uploaded = state.file_service.handle_upload(&original_name, body).await?;
            return Ok(UploadResponse::from(uploaded));
        }
        Err(AppError::BadRequest("No file selected".to_string()))
    }
    .await;

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            // Drain what is left so the client sees the error instead of a reset
            while let Ok(Some(mut field)) = multipart.next_field().await {
                while let Ok(Some(_)) = field.chunk().await {}
            }
            Err(e)
        }
    }
}
