use crate::keys::{generate_output_name, validate_key};
use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Attempts at finding an unused name before giving up on an upload.
const MAX_NAME_ATTEMPTS: usize = 3;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Directory converted files are written to (created if missing)
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:3000/images")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path. Keys are single path segments,
    /// so the joined path can never leave the base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Write `data` to a new file; fails with `AlreadyExists` instead of overwriting.
    async fn write_new(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, extension: &str, data: Vec<u8>) -> StorageResult<(String, String)> {
        let size = data.len();
        let start = std::time::Instant::now();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let key = generate_output_name(extension);
            let path = self.key_to_path(&key)?;

            match Self::write_new(&path, &data).await {
                Ok(()) => {
                    let url = self.public_url(&key);
                    tracing::info!(
                        path = %path.display(),
                        key = %key,
                        size_bytes = size,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Local storage upload successful"
                    );
                    return Ok((key, url));
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!(key = %key, "Generated name already taken, retrying");
                }
                Err(e) => {
                    // A partially written file is worthless; drop it before reporting.
                    let _ = fs::remove_file(&path).await;
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to write file {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        Err(StorageError::UploadFailed(format!(
            "Could not find a free file name after {} attempts",
            MAX_NAME_ATTEMPTS
        )))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn download_stream(&self, storage_key: &str) -> StorageResult<ByteStream> {
        let path = self.key_to_path(storage_key)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(storage_key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let key = storage_key.to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(key = %key, error = %e, "Local storage stream download error");
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = %storage_key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url, storage_key)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let metadata = fs::metadata(&self.base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Storage directory {} is not accessible: {}",
                self.base_path.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "Storage path {} is not a directory",
                self.base_path.display()
            )));
        }
        if metadata.permissions().readonly() {
            return Err(StorageError::ConfigError(format!(
                "Storage directory {} is read-only",
                self.base_path.display()
            )));
        }

        Ok(())
    }
}
