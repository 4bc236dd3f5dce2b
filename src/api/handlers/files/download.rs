use crate::api::error::AppError;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::Response,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tokio_util::io::ReaderStream;

/// `attachment` disposition with an ASCII fallback and the RFC 5987
/// `filename*` form for everything else.
pub fn content_disposition(filename: &str) -> String {
    let ascii_filename = filename
        .chars()
        .filter(|c| c.is_ascii() && !c.is_control() && *c != '"' && *c != '\\' && *c != ';')
        .take(64)
        .collect::<String>();
    let fallback_filename = if ascii_filename.is_empty() {
        "file"
    } else {
        &ascii_filename
    };

    let encoded_filename = utf8_percent_encode(filename, NON_ALPHANUMERIC).to_string();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback_filename, encoded_filename
    )
}

#[utoipa::path(
    get,
    path = "/files/{filename}",
    params(
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File download stream"),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn download_file(
    State(state): State<crate::AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    // 1. Resolve & open
    let (record, reader) = state.file_service.open_download(&filename).await?;

    // 2. Headers
    let content_type: mime::Mime = mime_guess::from_path(&record.name).first_or_octet_stream();
    let last_modified = record
        .modified_at
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();

    // 3. Stream the body
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, record.size_bytes)
        .header(header::CONTENT_DISPOSITION, content_disposition(&record.name))
        .header(header::LAST_MODIFIED, last_modified)
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build download response: {}", e)))
}
