use crate::api::error::AppError;
use crate::models::{UploadResult, category, download_path};
use crate::services::storage::StorageError;
use crate::utils::validation::validate_upload_name;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt};
use std::io;
use tokio_util::io::StreamReader;
use uuid::Uuid;

use super::FileService;

/// `<UTC yyyymmdd_hhmmss>_<8 hex>_<base>`. The prefix only keeps equal base
/// names apart; it says nothing about content.
pub fn generate_stored_name(base_name: &str, now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", now.format("%Y%m%d_%H%M%S"), &random[..8], base_name)
}

/// Fails the stream with `FileTooLarge` as soon as it yields more than
/// `max_bytes`.
pub fn limit_upload_stream<S>(stream: S, max_bytes: usize) -> impl Stream<Item = io::Result<Bytes>>
where
    S: Stream<Item = io::Result<Bytes>>,
{
    let mut seen: usize = 0;
    stream.map(move |chunk| {
        let chunk = chunk?;
        seen = seen.saturating_add(chunk.len());
        if seen > max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::FileTooLarge,
                format!("upload exceeds {} bytes", max_bytes),
            ));
        }
        Ok(chunk)
    })
}

impl FileService {
    /// Validates the client filename, stores the body under a fresh name and
    /// reports what was written.
    pub async fn handle_upload<'a, S>(
        &self,
        original_name: &str,
        body: S,
    ) -> Result<UploadResult, AppError>
    where
        S: Stream<Item = io::Result<Bytes>> + Unpin + Send + 'a,
    {
        // 1. Validate & sanitize the client supplied name
        let base_name = validate_upload_name(original_name)?;

        // 2. Collision resistant stored name
        let stored_name = generate_stored_name(&base_name, self.clock.now());

        // 3. Stream to storage with the size ceiling applied
        let limited = limit_upload_stream(body, self.config.max_upload_size);
        let reader = StreamReader::new(limited);

        let size_bytes = self
            .storage
            .save(&stored_name, Box::new(reader))
            .await
            .map_err(|e| match e {
                StorageError::TooLarge => AppError::PayloadTooLarge(format!(
                    "File exceeds the maximum upload size of {} MB",
                    self.config.max_upload_size / 1024 / 1024
                )),
                StorageError::Io(ref io_err) if io_err.kind() == io::ErrorKind::InvalidData => {
                    tracing::warn!("Malformed upload body for {}: {}", original_name, io_err);
                    AppError::BadRequest("Malformed upload body".to_string())
                }
                other => AppError::Internal(format!(
                    "Upload of {} as {} failed: {}",
                    original_name, stored_name, other
                )),
            })?;

        tracing::info!(
            "📦 Stored upload {:?} as {} ({} bytes)",
            original_name,
            stored_name,
            size_bytes
        );

        Ok(UploadResult {
            download_path: download_path(&stored_name),
            category: category::classify(&base_name),
            original_name: base_name,
            stored_name,
            size_bytes,
        })
    }
}
