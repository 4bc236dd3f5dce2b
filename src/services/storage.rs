use crate::models::FileRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use uuid::Uuid;

pub type ByteReader<'a> = Box<dyn AsyncRead + Unpin + Send + 'a>;

/// Prefix of in-flight upload files; hidden, so listings never see them.
const TEMP_PREFIX: &str = ".upload-";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Upload exceeds the maximum allowed size")]
    TooLarge,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    fn from_io(err: io::Error, name: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(name.to_string()),
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
            io::ErrorKind::FileTooLarge => StorageError::TooLarge,
            _ => StorageError::Io(err),
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Access to the single storage directory.
///
/// Every name is checked by [`validate_stored_name`] before it becomes a
/// path, so callers never build paths themselves.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Regular, non-hidden files in the root. Fails with `NotFound` when the
    /// root itself is missing.
    async fn list(&self) -> StorageResult<Vec<FileRecord>>;
    async fn stat(&self, name: &str) -> StorageResult<FileRecord>;
    /// Writes the stream under `name` and returns the byte count. The file
    /// only appears once fully written.
    async fn save<'a>(&self, name: &str, reader: ByteReader<'a>) -> StorageResult<u64>;
    async fn delete(&self, name: &str) -> StorageResult<()>;
    async fn open(&self, name: &str) -> StorageResult<(FileRecord, ByteReader<'static>)>;
    async fn root_exists(&self) -> bool;
    /// Human-readable location of the root, for diagnostics.
    fn location(&self) -> String;
}

/// Rejects any name that could resolve outside the storage root.
pub fn validate_stored_name(name: &str) -> StorageResult<()> {
    let invalid = || StorageError::InvalidName(name.to_string());

    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        return Err(invalid());
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return Err(invalid());
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        validate_stored_name(name).inspect_err(|_| {
            tracing::warn!("🚫 Rejected unsafe file name: {:?}", name);
        })?;
        Ok(self.root.join(name))
    }

    /// Metadata of `name` without following links. Symlinks are reported as
    /// missing so nothing outside the root can be reached through one.
    async fn regular_file_metadata(&self, name: &str, path: &Path) -> StorageResult<std::fs::Metadata> {
        let metadata = fs::symlink_metadata(path)
            .await
            .map_err(|e| StorageError::from_io(e, name))?;
        if metadata.file_type().is_symlink() {
            tracing::warn!("🚫 Refusing to follow symlink {:?}", name);
            return Err(StorageError::NotFound(name.to_string()));
        }
        if !metadata.is_file() {
            return Err(StorageError::NotAFile(name.to_string()));
        }
        Ok(metadata)
    }

    async fn remove_temp(temp: &Path) {
        if let Err(e) = fs::remove_file(temp).await
            && e.kind() != io::ErrorKind::NotFound
        {
            tracing::error!("❌ Failed to remove temp file {:?}: {}", temp, e);
        }
    }

    async fn write_temp(path: &Path, mut reader: ByteReader<'_>) -> io::Result<u64> {
        let mut file = fs::File::create(path).await?;
        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }
}

fn record_from_metadata(name: String, metadata: &std::fs::Metadata) -> io::Result<FileRecord> {
    let modified: DateTime<Utc> = metadata.modified()?.into();
    Ok(FileRecord::new(name, metadata.len(), modified))
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn list(&self) -> StorageResult<Vec<FileRecord>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::from_io(e, &self.root.display().to_string()))?;

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!("Skipping non UTF-8 entry: {:?}", entry.file_name());
                continue;
            };
            if validate_stored_name(&name).is_err() {
                continue;
            }

            // Symlinks are never listed; entries deleted mid-scan are skipped
            let metadata = match fs::symlink_metadata(entry.path()).await {
                Ok(m) => m,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("⚠️  Skipping unreadable entry {:?}: {}", name, e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            match metadata.modified() {
                Ok(modified) => records.push(FileRecord::new(name, metadata.len(), modified.into())),
                Err(e) => tracing::warn!("⚠️  Skipping {:?} without a modification time: {}", name, e),
            }
        }

        Ok(records)
    }

    async fn stat(&self, name: &str) -> StorageResult<FileRecord> {
        let path = self.resolve(name)?;
        let metadata = self.regular_file_metadata(name, &path).await?;
        Ok(record_from_metadata(name.to_string(), &metadata)?)
    }

    async fn save<'a>(&self, name: &str, reader: ByteReader<'a>) -> StorageResult<u64> {
        let target = self.resolve(name)?;
        let temp = self
            .root
            .join(format!("{}{}.part", TEMP_PREFIX, Uuid::new_v4().simple()));

        let written = match Self::write_temp(&temp, reader).await {
            Ok(n) => n,
            Err(e) => {
                Self::remove_temp(&temp).await;
                return Err(StorageError::from_io(e, name));
            }
        };

        // A hard link fails with AlreadyExists instead of replacing the target
        let linked = fs::hard_link(&temp, &target).await;
        Self::remove_temp(&temp).await;
        linked.map_err(|e| StorageError::from_io(e, name))?;

        tracing::debug!("💾 Stored {} ({} bytes)", name, written);
        Ok(written)
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.resolve(name)?;
        self.regular_file_metadata(name, &path).await?;
        fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::from_io(e, name))
    }

    async fn open(&self, name: &str) -> StorageResult<(FileRecord, ByteReader<'static>)> {
        let path = self.resolve(name)?;
        let metadata = match self.regular_file_metadata(name, &path).await {
            Err(StorageError::NotAFile(n)) => return Err(StorageError::NotFound(n)),
            other => other?,
        };
        let file = fs::File::open(&path)
            .await
            .map_err(|e| StorageError::from_io(e, name))?;
        let record = record_from_metadata(name.to_string(), &metadata)?;
        Ok((record, Box::new(file)))
    }

    async fn root_exists(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}
