//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte stream returned by [`Storage::download_stream`].
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// The batch converter writes through this trait and the image route reads
/// through it, so neither depends on where the bytes actually live.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under a freshly generated name and return (storage_key, public_url).
    async fn upload(&self, extension: &str, data: Vec<u8>) -> StorageResult<(String, String)>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Download a file as a stream of chunks
    async fn download_stream(&self, storage_key: &str) -> StorageResult<ByteStream>;

    /// Delete a file by its storage key. Deleting a missing key is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL for a storage key
    fn public_url(&self, storage_key: &str) -> String;

    /// Cheap liveness probe of the backend.
    async fn health_check(&self) -> StorageResult<()> {
        self.exists("health-check-probe").await.map(drop)
    }
}
