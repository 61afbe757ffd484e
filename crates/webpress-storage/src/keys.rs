//! Output name generation and key validation shared by all storage writers.

use chrono::Utc;

use crate::traits::{StorageError, StorageResult};

/// Generate a collision-resistant file name: `<unix-millis>-<random hex>.<extension>`.
///
/// The timestamp keeps names roughly sortable; the 32-bit random suffix keeps
/// concurrent requests within the same millisecond apart.
pub fn generate_output_name(extension: &str) -> String {
    format!(
        "{}-{:08x}.{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>(),
        extension.trim_start_matches('.')
    )
}

/// Reject keys that are not a single, plain path segment.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.len() > 255 {
        return Err(StorageError::InvalidKey(
            "Storage key must be between 1 and 255 characters".to_string(),
        ));
    }

    if key.contains("..") || key.starts_with('.') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid path traversal".to_string(),
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
