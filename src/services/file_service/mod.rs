use crate::config::ServerConfig;
use crate::services::{
    clock::{Clock, SystemClock},
    storage::StorageService,
};
use std::sync::Arc;

pub mod delete;
pub mod download;
pub mod listing;
pub mod upload;

pub use upload::{generate_stored_name, limit_upload_stream};

/// Upload, listing, stats, delete and download on top of the storage root.
pub struct FileService {
    storage: Arc<dyn StorageService>,
    config: ServerConfig,
    clock: Arc<dyn Clock>,
}

impl FileService {
    pub fn new(storage: Arc<dyn StorageService>, config: ServerConfig) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        storage: Arc<dyn StorageService>,
        config: ServerConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn StorageService> {
        &self.storage
    }
}
