//! To-do item types and request payloads.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use todo_shared::{OwnerId, TodoId};

use super::error::TodoError;

/// Maximum length of an item name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// A single to-do entry, keyed by `(owner_id, item_id)`.
///
/// Field names are camelCase both on the wire and as table attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Partition key: the owning principal.
    pub owner_id: OwnerId,
    /// Sort key: generated at creation, never changed afterwards.
    pub item_id: TodoId,
    /// User-supplied title.
    pub name: String,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// User-supplied due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Completion flag.
    #[serde(default)]
    pub done: bool,
    /// Public URL of the attachment, once an upload URL has been issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// Builds a fresh item for `owner_id` from a creation request.
    ///
    /// Assigns a new item ID, stamps `created_at` with the current time and starts
    /// with `done = false` and no attachment.
    #[must_use]
    pub fn new(request: CreateTodoRequest, owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            item_id: TodoId::generate(),
            name: request.name,
            created_at: now_timestamp(),
            due_date: request.due_date,
            done: false,
            attachment_url: None,
        }
    }
}

/// Request body for creating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// Item title.
    pub name: String,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CreateTodoRequest {
    /// Validates the request fields.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Validation` if the name or due date is malformed.
    pub fn validate(&self) -> Result<(), TodoError> {
        validate_name(&self.name)?;
        validate_due_date(self.due_date.as_deref())
    }
}

/// Request body for updating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    /// New title.
    pub name: String,
    /// New due date; absent clears it.
    #[serde(default)]
    pub due_date: Option<String>,
    /// New completion flag.
    pub done: bool,
}

impl UpdateTodoRequest {
    /// Validates the request fields.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Validation` if the name or due date is malformed.
    pub fn validate(&self) -> Result<(), TodoError> {
        validate_name(&self.name)?;
        validate_due_date(self.due_date.as_deref())
    }
}

/// The mutable fields written by an update. Everything else on the row is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoUpdate {
    /// New title.
    pub name: String,
    /// New due date, or `None` to remove it.
    pub due_date: Option<String>,
    /// New completion flag.
    pub done: bool,
}

impl From<UpdateTodoRequest> for TodoUpdate {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            name: request.name,
            due_date: request.due_date,
            done: request.done,
        }
    }
}

fn validate_name(name: &str) -> Result<(), TodoError> {
    if name.trim().is_empty() {
        return Err(TodoError::validation("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TodoError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_due_date(due_date: Option<&str>) -> Result<(), TodoError> {
    match due_date {
        Some(d) if d.trim().is_empty() => Err(TodoError::validation("dueDate must not be blank")),
        _ => Ok(()),
    }
}

/// Current UTC time as an ISO-8601 string with millisecond precision.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
