use crate::api::error::AppError;

use super::FileService;

impl FileService {
    /// Removes one stored file. Deleting twice reports `NotFound` the
    /// second time.
    pub async fn delete_file(&self, name: &str) -> Result<(), AppError> {
        self.storage.delete(name).await?;
        tracing::info!("🗑️  Deleted {}", name);
        Ok(())
    }
}
