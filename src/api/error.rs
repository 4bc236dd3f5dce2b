use crate::services::storage::StorageError;
use crate::utils::validation::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.message)
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Storage(e) => match e {
                StorageError::InvalidName(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid filename".to_string())
                }
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "File not found".to_string()),
                StorageError::NotAFile(_) => {
                    (StatusCode::BAD_REQUEST, "Not a regular file".to_string())
                }
                StorageError::PermissionDenied(name) => {
                    tracing::warn!("Permission denied on {}", name);
                    (
                        StatusCode::FORBIDDEN,
                        "Permission denied for this file".to_string(),
                    )
                }
                StorageError::TooLarge => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "File exceeds the maximum upload size".to_string(),
                ),
                other => {
                    tracing::error!("Storage error: {:?}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(AppError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(AppError::PayloadTooLarge("x".into())),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_status_mapping() {
        let cases = [
            (StorageError::InvalidName("..".into()), StatusCode::BAD_REQUEST),
            (StorageError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (StorageError::NotAFile("d".into()), StatusCode::BAD_REQUEST),
            (StorageError::PermissionDenied("p".into()), StatusCode::FORBIDDEN),
            (StorageError::TooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                StorageError::Io(io::Error::other("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(status(AppError::from(err)), expected);
        }
    }

    #[test]
    fn test_internal_cause_is_not_exposed() {
        let (_, message) = AppError::Internal("secret path /srv/x".into()).status_and_message();
        assert_eq!(message, "Internal Server Error");

        let (_, message) =
            AppError::from(StorageError::Io(io::Error::other("secret"))).status_and_message();
        assert_eq!(message, "Internal Server Error");
    }

    #[test]
    fn test_validation_error_message_is_kept() {
        let err = crate::utils::validation::validate_upload_name("x.exe").unwrap_err();
        let (status, message) = AppError::from(err).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Unsupported file type");
    }
}
