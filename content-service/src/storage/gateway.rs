use std::sync::Arc;

use tracing::debug;

use crate::models::QaIdentifiers;

use super::{ObjectStore, StorageError, StorageResult};

/// Validity window for every signed URL this service issues.
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Object gateway: existence checks, root-to-leaf folder provisioning and
/// signed URL issuance over an [`ObjectStore`] backend.
///
/// All calls are sequential with no retry layer. A failure at any step aborts
/// the whole operation; folder markers created before the failure are left in
/// place (they are zero-byte and idempotent to recreate).
pub struct ObjectGateway {
    store: Arc<dyn ObjectStore>,
}

impl ObjectGateway {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Whether an object exists at `key`. `Ok(false)` means the backend
    /// confirmed absence; failures to determine existence are errors.
    pub async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.store.head_object(key).await
    }

    /// Ensure the four ancestor folder markers for the identifier tuple
    /// exist, creating missing ones in root-to-leaf order. Each level is
    /// checked and created before the next one is considered.
    pub async fn ensure_ancestry(&self, identifiers: &QaIdentifiers) -> StorageResult<()> {
        for folder in identifiers.ancestor_folders() {
            if !self.store.head_object(&folder).await? {
                debug!("Creating folder marker: {}", folder);
                self.store.put_object(&folder, None).await?;
            }
        }
        Ok(())
    }

    /// Issue a read-capability signed URL for an existing object.
    pub async fn issue_read_url(&self, key: &str) -> StorageResult<String> {
        if !self.exists(key).await? {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let url = self.store.presign_get(key, SIGNED_URL_EXPIRY_SECS).await?;
        if url.is_empty() {
            return Err(StorageError::UrlGeneration(key.to_string()));
        }
        Ok(url)
    }

    /// Provision the ancestry, create a zero-length placeholder tagged with
    /// `content_type` at the derived key, and issue a write-capability signed
    /// URL for it. The upload payload itself is written later by the client,
    /// directly against the backend.
    pub async fn create_with_write_url(
        &self,
        identifiers: &QaIdentifiers,
        content_type: &str,
    ) -> StorageResult<(String, String)> {
        let key = identifiers.object_key();

        self.ensure_ancestry(identifiers).await?;
        self.store.put_object(&key, Some(content_type)).await?;

        let url = self
            .store
            .presign_put(&key, Some(content_type), SIGNED_URL_EXPIRY_SECS)
            .await?;
        if url.is_empty() {
            return Err(StorageError::UrlGeneration(key));
        }
        Ok((url, key))
    }

    /// Delete an existing object.
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        if !self.exists(key).await? {
            return Err(StorageError::NotFound(key.to_string()));
        }
        self.store.delete_object(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::{FailingStore, InMemoryStore};

    fn identifiers() -> QaIdentifiers {
        QaIdentifiers {
            admin_id: "A1".to_string(),
            course_id: "C1".to_string(),
            topic_id: "T1".to_string(),
            thread_id: "TH1".to_string(),
        }
    }

    #[tokio::test]
    async fn exists_is_false_for_missing_key() {
        let gateway = ObjectGateway::new(Arc::new(InMemoryStore::default()));
        assert!(!gateway.exists("A1/C1/T1/QA_Pairs/TH1").await.unwrap());
    }

    #[tokio::test]
    async fn exists_is_true_for_present_key() {
        let store = InMemoryStore::with_objects(&["A1/C1/T1/QA_Pairs/TH1"]);
        let gateway = ObjectGateway::new(Arc::new(store));
        assert!(gateway.exists("A1/C1/T1/QA_Pairs/TH1").await.unwrap());
    }

    #[tokio::test]
    async fn read_url_fails_not_found_for_missing_key() {
        let gateway = ObjectGateway::new(Arc::new(InMemoryStore::default()));
        let err = gateway.issue_read_url("missing").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn read_url_is_issued_for_present_key() {
        let store = InMemoryStore::with_objects(&["A1/C1/T1/QA_Pairs/TH1"]);
        let gateway = ObjectGateway::new(Arc::new(store));
        let url = gateway.issue_read_url("A1/C1/T1/QA_Pairs/TH1").await.unwrap();
        assert!(url.contains("A1/C1/T1/QA_Pairs/TH1"));
        assert!(url.contains("3600"));
    }

    #[tokio::test]
    async fn create_provisions_ancestry_and_returns_derived_key() {
        let store = Arc::new(InMemoryStore::default());
        let gateway = ObjectGateway::new(store.clone());

        let (url, key) = gateway
            .create_with_write_url(&identifiers(), "application/json")
            .await
            .unwrap();

        assert_eq!(key, "A1/C1/T1/QA_Pairs/TH1");
        assert!(!url.is_empty());
        for folder in ["A1/", "A1/C1/", "A1/C1/T1/", "A1/C1/T1/QA_Pairs/"] {
            assert!(store.contains(folder), "missing folder marker {folder}");
        }
        assert!(store.contains("A1/C1/T1/QA_Pairs/TH1"));
    }

    #[tokio::test]
    async fn ensure_ancestry_is_idempotent() {
        let store = Arc::new(InMemoryStore::default());
        let gateway = ObjectGateway::new(store.clone());

        gateway.ensure_ancestry(&identifiers()).await.unwrap();
        assert_eq!(store.puts(), 4);

        gateway.ensure_ancestry(&identifiers()).await.unwrap();
        assert_eq!(store.puts(), 4);
    }

    #[tokio::test]
    async fn created_key_round_trips_through_read_and_delete() {
        let store = Arc::new(InMemoryStore::default());
        let gateway = ObjectGateway::new(store.clone());

        let (_, key) = gateway
            .create_with_write_url(&identifiers(), "application/json")
            .await
            .unwrap();

        assert!(gateway.issue_read_url(&key).await.is_ok());
        gateway.delete(&key).await.unwrap();
        assert!(!gateway.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn delete_fails_not_found_for_missing_key() {
        let gateway = ObjectGateway::new(Arc::new(InMemoryStore::default()));
        let err = gateway.delete("missing").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn head_failure_propagates_as_backend_error() {
        let gateway = ObjectGateway::new(Arc::new(FailingStore));

        let err = gateway.exists("any").await.unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));

        let err = gateway.issue_read_url("any").await.unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
