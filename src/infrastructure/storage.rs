use crate::config::ServerConfig;
use crate::services::storage::LocalStorageService;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Creates the storage directory if needed and returns the service over it.
pub async fn setup_storage(config: &ServerConfig) -> anyhow::Result<Arc<LocalStorageService>> {
    tokio::fs::create_dir_all(&config.storage_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create storage directory {}",
                config.storage_dir.display()
            )
        })?;

    let root = tokio::fs::canonicalize(&config.storage_dir)
        .await
        .unwrap_or_else(|_| config.storage_dir.clone());

    info!("💾 Local Storage: {}", root.display());
    Ok(Arc::new(LocalStorageService::new(root)))
}
