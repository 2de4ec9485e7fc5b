//! Filesystem storage capability.
//!
//! Directory creation and file writes go through the [`Storage`] trait so
//! the engine never touches the filesystem directly. [`LocalStorage`] is
//! the tokio-backed production implementation.

use std::path::Path;

use async_trait::async_trait;

use super::error::DownloadError;

/// Capability to prepare directories and persist downloaded bytes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates the directory and any missing parents.
    ///
    /// Must be idempotent and race-safe: two tasks creating the same
    /// directory concurrently both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] if creation fails (permissions, etc.).
    async fn ensure_dir(&self, path: &Path) -> Result<(), DownloadError>;

    /// Writes the full byte buffer to the path, overwriting any existing
    /// file of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] if the write fails.
    async fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), DownloadError>;
}

/// Production storage on the local filesystem via `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[async_trait]
impl Storage for LocalStorage {
    async fn ensure_dir(&self, path: &Path) -> Result<(), DownloadError> {
        // create_dir_all succeeds when the directory already exists, so
        // concurrent creation of the same group directory is not an error
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| DownloadError::io(path, e))
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| DownloadError::io(path, e))
    }
}
