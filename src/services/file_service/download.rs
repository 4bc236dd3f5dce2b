use crate::api::error::AppError;
use crate::models::FileRecord;
use crate::services::storage::ByteReader;

use super::FileService;

impl FileService {
    /// Opens a stored file for streaming back to the client.
    pub async fn open_download(
        &self,
        name: &str,
    ) -> Result<(FileRecord, ByteReader<'static>), AppError> {
        let (record, reader) = self.storage.open(name).await?;
        tracing::debug!("📥 Streaming {} ({} bytes)", name, record.size_bytes);
        Ok((record, reader))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{setup_service, write_file};
    use super::*;
    use crate::services::storage::StorageError;
    use chrono::{TimeZone, Utc};
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_open_download_returns_bytes() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let (temp_dir, service) = setup_service(now);
        write_file(temp_dir.path(), "photo.webp", b"RIFFdata", now);

        let (record, mut reader) = service.open_download("photo.webp").await.unwrap();
        assert_eq!(record.size_bytes, 8);
        assert_eq!(record.modified_at, now);

        let mut content = Vec::new();
        reader.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"RIFFdata");
    }

    #[tokio::test]
    async fn test_open_download_missing_and_directories() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let (temp_dir, service) = setup_service(now);
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();

        for name in ["nope.txt", "nested"] {
            let err = service.open_download(name).await.err().unwrap();
            assert!(matches!(err, AppError::Storage(StorageError::NotFound(_))));
        }
    }
}
