//! Attachment helper implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use todo_shared::{OwnerId, TodoId};
use tracing::info;

use crate::storage::StorageService;
use crate::todo::{TodoError, TodoRepository};

/// URLs issued for an item attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUrls {
    /// Presigned PUT URL the client uploads to.
    pub upload_url: String,
    /// The object URL without signature parameters; recorded on the item.
    pub public_url: String,
    /// When the upload URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Issues presigned upload URLs and records attachment URLs on items.
pub struct AttachmentService<R: TodoRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: TodoRepository> AttachmentService<R> {
    /// Create a new attachment service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Presign an upload for the object keyed by `item_id`.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Storage` if presigning fails.
    pub async fn generate_upload_url(&self, item_id: &TodoId) -> Result<AttachmentUrls, TodoError> {
        let presigned = self.storage.presign_upload(item_id.as_str()).await?;

        Ok(AttachmentUrls {
            public_url: presigned.public_url().to_string(),
            upload_url: presigned.url,
            expires_at: presigned.expires_at,
        })
    }

    /// Presign an upload and record its public URL on the item.
    ///
    /// The URL is recorded before any upload happens; nothing checks that the
    /// object was ever written.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Storage` if presigning fails,
    /// `TodoError::ConditionalCheck` if the item does not exist, or
    /// `TodoError::Store` if the table write fails.
    pub async fn record_attachment(
        &self,
        item_id: &TodoId,
        owner_id: &OwnerId,
    ) -> Result<AttachmentUrls, TodoError> {
        let urls = self.generate_upload_url(item_id).await?;

        info!(
            owner_id = %owner_id,
            item_id = %item_id,
            public_url = %urls.public_url,
            bucket = %self.storage.bucket(),
            "Recording attachment URL"
        );

        self.repo
            .set_attachment_url(owner_id, item_id, &urls.public_url)
            .await?;

        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageProvider};
    use crate::todo::mock::MockTodoRepository;
    use std::time::Duration;

    fn s3_storage() -> Arc<StorageService> {
        let provider = StorageProvider::s3("todo-attachments", "us-east-1")
            .with_endpoint("http://127.0.0.1:9000")
            .with_static_credentials("test-access-key", "test-secret-key");
        Arc::new(StorageService::from_config(StorageConfig::new(provider)).unwrap())
    }

    #[tokio::test]
    async fn test_record_attachment_persists_public_url() {
        let repo = Arc::new(MockTodoRepository::new());
        let item = repo.seed("u1", "Buy milk");
        let service = AttachmentService::new(s3_storage(), repo.clone());

        let urls = service
            .record_attachment(&item.item_id, &item.owner_id)
            .await
            .unwrap();

        assert_eq!(urls.public_url.rsplit('/').next(), Some(item.item_id.as_str()));
        let stored = repo.get(&item.owner_id, &item.item_id).unwrap();
        assert_eq!(stored.attachment_url.as_deref(), Some(urls.public_url.as_str()));
    }

    #[tokio::test]
    async fn test_record_attachment_for_missing_item() {
        let repo = Arc::new(MockTodoRepository::new());
        let service = AttachmentService::new(s3_storage(), repo.clone());

        let err = service
            .record_attachment(&"missing-id".into(), &"u1".into())
            .await
            .unwrap_err();

        assert!(matches!(err, TodoError::ConditionalCheck { .. }));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_upload_urls_differ_but_share_object_key() {
        let repo = Arc::new(MockTodoRepository::new());
        let service = AttachmentService::new(s3_storage(), repo);
        let item_id = TodoId::generate();

        let first = service.generate_upload_url(&item_id).await.unwrap();
        // SigV4 timestamps have one-second resolution.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        let second = service.generate_upload_url(&item_id).await.unwrap();

        assert_ne!(first.upload_url, second.upload_url);
        assert_eq!(first.public_url, second.public_url);
    }
}
