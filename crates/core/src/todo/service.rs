//! Business logic for to-do items.

use std::sync::Arc;

use todo_shared::{OwnerId, TodoId};
use tracing::info;

use super::error::TodoError;
use super::types::{CreateTodoRequest, TodoItem, TodoUpdate, UpdateTodoRequest};
use crate::attachment::{AttachmentService, AttachmentUrls};
use crate::storage::StorageService;

/// Repository trait for item persistence.
///
/// This trait is implemented by the db crate to provide actual table operations.
pub trait TodoRepository: Send + Sync {
    /// Return every item whose partition key equals `owner_id`.
    fn list(
        &self,
        owner_id: &OwnerId,
    ) -> impl std::future::Future<Output = Result<Vec<TodoItem>, TodoError>> + Send;

    /// Insert an item, overwriting any item with the same key.
    fn create(
        &self,
        item: TodoItem,
    ) -> impl std::future::Future<Output = Result<TodoItem, TodoError>> + Send;

    /// Write `name`, `due_date` and `done`, provided the row with `item_id` exists.
    ///
    /// Fails with `TodoError::ConditionalCheck` otherwise, leaving the table unchanged.
    fn update(
        &self,
        update: &TodoUpdate,
        owner_id: &OwnerId,
        item_id: &TodoId,
    ) -> impl std::future::Future<Output = Result<(), TodoError>> + Send;

    /// Write `attachment_url`, provided the row with `item_id` exists.
    fn set_attachment_url(
        &self,
        owner_id: &OwnerId,
        item_id: &TodoId,
        url: &str,
    ) -> impl std::future::Future<Output = Result<(), TodoError>> + Send;

    /// Delete an item. Deleting a missing item succeeds.
    fn delete(
        &self,
        owner_id: &OwnerId,
        item_id: &TodoId,
    ) -> impl std::future::Future<Output = Result<(), TodoError>> + Send;
}

/// One operation per user-facing action, awaited sequentially.
pub struct TodoService<R: TodoRepository> {
    repo: Arc<R>,
    attachments: AttachmentService<R>,
}

impl<R: TodoRepository> TodoService<R> {
    /// Create a new service over a repository and an attachment bucket.
    #[must_use]
    pub fn new(repo: Arc<R>, storage: Arc<StorageService>) -> Self {
        let attachments = AttachmentService::new(storage, Arc::clone(&repo));
        Self { repo, attachments }
    }

    /// List the owner's items.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Store` if the query fails.
    pub async fn list_todos(&self, owner_id: &OwnerId) -> Result<Vec<TodoItem>, TodoError> {
        info!(owner_id = %owner_id, "Listing todos");
        let items = self.repo.list(owner_id).await?;
        info!(owner_id = %owner_id, count = items.len(), "Listed todos");
        Ok(items)
    }

    /// Create an item with a fresh ID and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Validation` for a malformed request, or
    /// `TodoError::Store` if the write fails.
    pub async fn create_todo(
        &self,
        request: CreateTodoRequest,
        owner_id: &OwnerId,
    ) -> Result<TodoItem, TodoError> {
        request.validate()?;

        let item = TodoItem::new(request, owner_id.clone());
        info!(owner_id = %owner_id, item_id = %item.item_id, "Creating todo");

        let item = self.repo.create(item).await?;
        info!(owner_id = %owner_id, item_id = %item.item_id, "Created todo");
        Ok(item)
    }

    /// Update an item's name, due date and completion flag.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Validation` for a malformed request,
    /// `TodoError::ConditionalCheck` if the item does not exist, or
    /// `TodoError::Store` if the write fails.
    pub async fn update_todo(
        &self,
        request: UpdateTodoRequest,
        owner_id: &OwnerId,
        item_id: &TodoId,
    ) -> Result<(), TodoError> {
        request.validate()?;

        let update = TodoUpdate::from(request);
        info!(owner_id = %owner_id, item_id = %item_id, done = update.done, "Updating todo");

        self.repo.update(&update, owner_id, item_id).await?;
        info!(owner_id = %owner_id, item_id = %item_id, "Updated todo");
        Ok(())
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Store` if the delete fails.
    pub async fn delete_todo(&self, owner_id: &OwnerId, item_id: &TodoId) -> Result<(), TodoError> {
        info!(owner_id = %owner_id, item_id = %item_id, "Deleting todo");
        self.repo.delete(owner_id, item_id).await?;
        info!(owner_id = %owner_id, item_id = %item_id, "Deleted todo");
        Ok(())
    }

    /// Issue an upload URL for an item's attachment and record its public URL.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`AttachmentService::record_attachment`].
    pub async fn generate_upload_url(
        &self,
        item_id: &TodoId,
        owner_id: &OwnerId,
    ) -> Result<AttachmentUrls, TodoError> {
        let urls = self.attachments.record_attachment(item_id, owner_id).await?;
        info!(owner_id = %owner_id, item_id = %item_id, "Generated upload URL");
        Ok(urls)
    }
}
