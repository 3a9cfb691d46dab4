/// S3-backed object store
///
/// Thin wrapper over the AWS SDK: every trait method is a single remote call,
/// with the backend's not-found signal separated from genuine failures.
use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::time::Duration;
use tracing::debug;

use super::{ObjectStore, StorageError, StorageResult};

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn presign_config(expires_in_secs: u64) -> StorageResult<PresigningConfig> {
        PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn head_object(&self, key: &str) -> StorageResult<bool> {
        debug!("Checking object existence in S3: {}", key);

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Backend(format!(
                        "Error checking object existence: {err}"
                    )))
                }
            }
        }
    }

    async fn put_object(&self, key: &str, content_type: Option<&str>) -> StorageResult<()> {
        debug!("Creating object in S3: {} ({:?})", key, content_type);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from_static(b""))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        debug!("Deleting object from S3: {}", key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in_secs: u64) -> StorageResult<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presign_config(expires_in_secs)?)
            .await
            .map_err(|e| StorageError::Backend(e.into_service_error().to_string()))?;

        Ok(presigned.uri().to_string())
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: Option<&str>,
        expires_in_secs: u64,
    ) -> StorageResult<String> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .presigned(Self::presign_config(expires_in_secs)?)
            .await
            .map_err(|e| StorageError::Backend(e.into_service_error().to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
