// Storage layer: object store abstraction plus the S3 implementation and the
// provisioning gateway built on top of it.

pub mod gateway;
pub mod s3_client;

use async_trait::async_trait;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("signed URL generation failed: {0}")]
    UrlGeneration(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Narrow interface over the object-storage backend. One method per remote
/// call, so backends are substitutable and the workflow is testable without
/// network access.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Metadata-only existence probe. The backend's explicit not-found signal
    /// maps to `Ok(false)`; any other failure is an error, so callers can
    /// tell "confirmed absent" from "could not determine".
    async fn head_object(&self, key: &str) -> StorageResult<bool>;

    /// Create a zero-byte object at `key`, optionally tagged with a content
    /// type. Used both for folder markers and object placeholders.
    async fn put_object(&self, key: &str, content_type: Option<&str>) -> StorageResult<()>;

    async fn delete_object(&self, key: &str) -> StorageResult<()>;

    /// Signed GET URL for `key`, valid for `expires_in_secs`.
    async fn presign_get(&self, key: &str, expires_in_secs: u64) -> StorageResult<String>;

    /// Signed PUT URL for `key`, valid for `expires_in_secs`.
    async fn presign_put(
        &self,
        key: &str,
        content_type: Option<&str>,
        expires_in_secs: u64,
    ) -> StorageResult<String>;
}
