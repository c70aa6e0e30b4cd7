//! Local-disk storage for converted uploads.
//!
//! Files live at `<root>/<folder>/<uuid>.webp` and are served under
//! `/uploads/<folder>/<uuid>.webp`.

use std::path::{Path, PathBuf};

use pondasi_core::imaging::OUTPUT_EXTENSION;
use uuid::Uuid;

/// URL prefix under which [`UploadStorage::root`] is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Folder used when the client does not name one.
pub const DEFAULT_FOLDER: &str = "images";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid upload folder '{0}'. Use lowercase letters, digits, '-' or '_'")]
    InvalidFolder(String),

    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A file written to storage.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub disk_path: PathBuf,
    /// Public URL path, e.g. `/uploads/gallery/<uuid>.webp`.
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `folder` with a fresh UUIDv7 name.
    pub async fn save(&self, folder: &str, bytes: &[u8]) -> Result<StoredFile, StorageError> {
        validate_folder(folder)?;
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{OUTPUT_EXTENSION}", Uuid::now_v7());
        let disk_path = dir.join(&file_name);
        tokio::fs::write(&disk_path, bytes).await?;

        Ok(StoredFile {
            disk_path,
            public_path: format!("{PUBLIC_PREFIX}/{folder}/{file_name}"),
        })
    }

    /// Best-effort removal of previously stored files.
    pub async fn remove_all(&self, files: &[StoredFile]) {
        for file in files {
            if let Err(e) = tokio::fs::remove_file(&file.disk_path).await {
                tracing::warn!(path = %file.disk_path.display(), error = %e, "Failed to remove upload");
            }
        }
    }
}

/// Folder names are a single path segment of `[a-z0-9_-]`.
pub fn validate_folder(folder: &str) -> Result<(), StorageError> {
    let valid = !folder.is_empty()
        && folder.len() <= 50
        && folder
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidFolder(folder.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn folder_names_are_single_safe_segments() {
        assert!(validate_folder("gallery").is_ok());
        assert!(validate_folder("project_images-2").is_ok());
        assert_matches!(validate_folder("../etc"), Err(StorageError::InvalidFolder(_)));
        assert_matches!(validate_folder("a/b"), Err(StorageError::InvalidFolder(_)));
        assert_matches!(validate_folder(""), Err(StorageError::InvalidFolder(_)));
    }

    #[tokio::test]
    async fn save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path().to_path_buf());

        let stored = storage.save("gallery", b"RIFF....WEBP").await.unwrap();
        assert!(stored.public_path.starts_with("/uploads/gallery/"));
        assert!(stored.public_path.ends_with(".webp"));
        assert!(stored.disk_path.exists());

        storage.remove_all(std::slice::from_ref(&stored)).await;
        assert!(!stored.disk_path.exists());
    }
}
