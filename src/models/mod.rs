pub mod category;

use chrono::{DateTime, Utc};

pub use category::Category;

/// A view over one directory entry, built from a stat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    pub category: Option<Category>,
}

impl FileRecord {
    pub fn new(name: String, size_bytes: u64, modified_at: DateTime<Utc>) -> Self {
        let category = category::classify(&name);
        Self {
            name,
            size_bytes,
            modified_at,
            category,
        }
    }

    pub fn download_path(&self) -> String {
        download_path(&self.name)
    }
}

/// Returned once per successful upload; nothing is kept server-side.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub stored_name: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub category: Option<Category>,
    pub download_path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub total_files: u64,
    pub total_bytes: u64,
    pub files_modified_today: u64,
}

pub fn download_path(name: &str) -> String {
    format!("/files/{}", name)
}
