//! Item repository for table operations.
//!
//! Items are stored one row per `(ownerId, itemId)`, with camelCase attribute
//! names matching [`TodoItem`]'s serialized form.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::{from_items, to_item};
use todo_core::todo::{TodoError, TodoItem, TodoRepository, TodoUpdate};
use todo_shared::{OwnerId, TodoId};
use tracing::info;

/// Partition key attribute.
pub const OWNER_ID: &str = "ownerId";
/// Sort key attribute.
pub const ITEM_ID: &str = "itemId";

const NAME: &str = "name";
const DUE_DATE: &str = "dueDate";
const DONE: &str = "done";
const ATTACHMENT_URL: &str = "attachmentUrl";

/// Item repository implementation.
#[derive(Debug, Clone)]
pub struct DynamoTodoRepository {
    client: Client,
    table_name: String,
}

impl DynamoTodoRepository {
    /// Create a new repository over `table_name`.
    #[must_use]
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// The table this repository reads and writes.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn string_value(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

fn store_error<E: std::error::Error>(err: E) -> TodoError {
    TodoError::store(DisplayErrorContext(err).to_string())
}

/// Maps a failed conditional update to `ConditionalCheck`, anything else to `Store`.
fn update_error(err: &SdkError<UpdateItemError>, item_id: &TodoId) -> TodoError {
    let condition_failed = matches!(
        err,
        SdkError::ServiceError(inner)
            if matches!(inner.err(), UpdateItemError::ConditionalCheckFailedException(_))
    );

    if condition_failed {
        TodoError::conditional_check(item_id.clone())
    } else {
        store_error(err)
    }
}

impl TodoRepository for DynamoTodoRepository {
    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<TodoItem>, TodoError> {
        info!(table = %self.table_name, owner_id = %owner_id, "Querying items");

        let rows = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#ownerId = :ownerId")
            .expression_attribute_names("#ownerId", OWNER_ID)
            .expression_attribute_values(":ownerId", string_value(owner_id.as_str()))
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(store_error)?;

        from_items(rows).map_err(|e| TodoError::store(e.to_string()))
    }

    async fn create(&self, item: TodoItem) -> Result<TodoItem, TodoError> {
        let attributes = to_item(&item).map_err(|e| TodoError::store(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(store_error)?;

        info!(
            table = %self.table_name,
            owner_id = %item.owner_id,
            item_id = %item.item_id,
            "Put item"
        );
        Ok(item)
    }

    async fn update(
        &self,
        update: &TodoUpdate,
        owner_id: &OwnerId,
        item_id: &TodoId,
    ) -> Result<(), TodoError> {
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(OWNER_ID, string_value(owner_id.as_str()))
            .key(ITEM_ID, string_value(item_id.as_str()))
            .condition_expression("#itemId = :itemId")
            .expression_attribute_names("#itemId", ITEM_ID)
            .expression_attribute_names("#name", NAME)
            .expression_attribute_names("#done", DONE)
            .expression_attribute_names("#dueDate", DUE_DATE)
            .expression_attribute_values(":itemId", string_value(item_id.as_str()))
            .expression_attribute_values(":name", string_value(update.name.as_str()))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done));

        // A cleared due date removes the attribute rather than storing null.
        let expression = if let Some(due_date) = &update.due_date {
            request = request.expression_attribute_values(":dueDate", string_value(due_date));
            "SET #name = :name, #done = :done, #dueDate = :dueDate"
        } else {
            "SET #name = :name, #done = :done REMOVE #dueDate"
        };

        request
            .update_expression(expression)
            .send()
            .await
            .map_err(|e| update_error(&e, item_id))?;

        info!(
            table = %self.table_name,
            owner_id = %owner_id,
            item_id = %item_id,
            "Updated item"
        );
        Ok(())
    }

    async fn set_attachment_url(
        &self,
        owner_id: &OwnerId,
        item_id: &TodoId,
        url: &str,
    ) -> Result<(), TodoError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(OWNER_ID, string_value(owner_id.as_str()))
            .key(ITEM_ID, string_value(item_id.as_str()))
            .condition_expression("#itemId = :itemId")
            .update_expression("SET #attachmentUrl = :attachmentUrl")
            .expression_attribute_names("#itemId", ITEM_ID)
            .expression_attribute_names("#attachmentUrl", ATTACHMENT_URL)
            .expression_attribute_values(":itemId", string_value(item_id.as_str()))
            .expression_attribute_values(":attachmentUrl", string_value(url))
            .send()
            .await
            .map_err(|e| update_error(&e, item_id))?;

        info!(
            table = %self.table_name,
            owner_id = %owner_id,
            item_id = %item_id,
            "Set attachment URL"
        );
        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId, item_id: &TodoId) -> Result<(), TodoError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(OWNER_ID, string_value(owner_id.as_str()))
            .key(ITEM_ID, string_value(item_id.as_str()))
            .send()
            .await
            .map_err(store_error)?;

        info!(
            table = %self.table_name,
            owner_id = %owner_id,
            item_id = %item_id,
            "Deleted item"
        );
        Ok(())
    }
}
