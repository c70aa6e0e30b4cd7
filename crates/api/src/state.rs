use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::UploadStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pondasi_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Converted image storage under `UPLOAD_DIR`.
    pub storage: Arc<UploadStorage>,
}

impl AppState {
    pub fn new(pool: pondasi_db::DbPool, config: ServerConfig) -> Self {
        let storage = Arc::new(UploadStorage::new(config.upload.dir.clone()));
        Self {
            pool,
            config: Arc::new(config),
            storage,
        }
    }
}
