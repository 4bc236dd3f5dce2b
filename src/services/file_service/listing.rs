use crate::api::error::AppError;
use crate::models::{FileRecord, FileStats};
use crate::services::storage::StorageError;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::FileService;

pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Newest first; equal timestamps fall back to name order.
pub fn sort_newest_first(records: &mut [FileRecord]) {
    records.sort_by(|a, b| {
        b.modified_at
            .cmp(&a.modified_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}

pub fn summarize(records: &[FileRecord], today: NaiveDate, tz: Tz) -> FileStats {
    records.iter().fold(FileStats::default(), |mut stats, record| {
        stats.total_files += 1;
        stats.total_bytes += record.size_bytes;
        if local_date(record.modified_at, tz) == today {
            stats.files_modified_today += 1;
        }
        stats
    })
}

impl FileService {
    /// Every stored file, newest first. A missing root lists as empty.
    pub async fn list_files(&self) -> Result<Vec<FileRecord>, AppError> {
        let mut records = match self.storage.list().await {
            Ok(records) => records,
            Err(StorageError::NotFound(_)) => {
                tracing::warn!("📂 Storage directory {} is missing", self.storage.location());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Listing for the legacy `/videos` route: fails when the root is gone.
    pub async fn list_files_legacy(&self) -> Result<Vec<FileRecord>, AppError> {
        if !self.storage.root_exists().await {
            return Err(AppError::NotFound(
                "Storage directory does not exist".to_string(),
            ));
        }
        let mut records = self.storage.list().await?;
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    pub async fn compute_stats(&self) -> Result<FileStats, AppError> {
        let records = self.list_files().await?;
        let tz = self.config.timezone;
        let today = local_date(self.clock.now(), tz);
        Ok(summarize(&records, today, tz))
    }

    /// Formats a timestamp for display in the configured timezone.
    pub fn display_time(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.config.timezone)
            .format(DISPLAY_DATE_FORMAT)
            .to_string()
    }
}
