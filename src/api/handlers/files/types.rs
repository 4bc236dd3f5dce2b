use crate::models::{Category, FileRecord, FileStats, UploadResult, category};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    /// Name the file is stored (and downloaded) under
    pub filename: String,
    /// Sanitized client filename
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub download_url: String,
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        Self {
            status: "success".to_string(),
            message: "File uploaded successfully".to_string(),
            filename: result.stored_name,
            original_name: result.original_name,
            size: result.size_bytes,
            file_type: category::label_for(result.category).to_string(),
            download_url: result.download_path,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct FileEntry {
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub icon: String,
    pub color: String,
    pub previewable: bool,
    pub download_url: String,
    /// Modification time, `%Y-%m-%d %H:%M:%S` in the server timezone
    pub upload_date: String,
}

impl FileEntry {
    pub fn from_record(record: FileRecord, upload_date: String) -> Self {
        let (icon, color) = match record.category {
            Some(c) => (c.icon(), c.color()),
            None => (category::UNKNOWN_ICON, category::UNKNOWN_COLOR),
        };
        Self {
            previewable: category::is_previewable(&record.name),
            file_type: category::label_for(record.category).to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            download_url: record.download_path(),
            size: record.size_bytes,
            filename: record.name,
            upload_date,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_files: u64,
    pub uploaded_today: u64,
    pub total_size: u64,
}

impl From<FileStats> for StatsResponse {
    fn from(stats: FileStats) -> Self {
        Self {
            total_files: stats.total_files,
            uploaded_today: stats.files_modified_today,
            total_size: stats.total_bytes,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
    pub filename: String,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    pub key: Category,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub extensions: Vec<String>,
    pub previewable: Vec<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        let to_owned = |exts: &[&str]| exts.iter().map(|e| e.to_string()).collect();
        Self {
            key: c,
            label: c.label().to_string(),
            icon: c.icon().to_string(),
            color: c.color().to_string(),
            extensions: to_owned(c.extensions()),
            previewable: to_owned(c.previewable_extensions()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LegacyFileEntry {
    pub filename: String,
    pub size: u64,
    pub download_url: String,
}

#[derive(Serialize, ToSchema)]
pub struct LegacyListResponse {
    pub directory: String,
    pub total_files: usize,
    pub files: Vec<LegacyFileEntry>,
}
