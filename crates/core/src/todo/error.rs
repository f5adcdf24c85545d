//! To-do operation errors.

use thiserror::Error;
use todo_shared::{AppError, TodoId};

use crate::storage::StorageError;

/// Errors raised by the data-access layer, the attachment helper and the
/// business-logic layer. They propagate unchanged up to the HTTP boundary.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed request body.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The conditional update found no row with the requested item ID.
    #[error("conditional check failed for item {item_id}")]
    ConditionalCheck {
        /// The item the update targeted.
        item_id: TodoId,
    },

    /// Transport or service failure from the key-value store.
    #[error("store error: {0}")]
    Store(String),

    /// Object storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TodoError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conditional check error.
    #[must_use]
    pub fn conditional_check(item_id: TodoId) -> Self {
        Self::ConditionalCheck { item_id }
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(msg) => Self::Validation(msg),
            TodoError::ConditionalCheck { item_id } => {
                Self::NotFound(format!("todo item {item_id}"))
            }
            TodoError::Store(msg) => Self::Database(msg),
            TodoError::Storage(StorageError::InvalidKey(key)) => {
                Self::Validation(format!("invalid item id for attachment: {key:?}"))
            }
            TodoError::Storage(e) => Self::ExternalService(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        let not_found: AppError = TodoError::conditional_check("missing-id".into()).into();
        assert_eq!(not_found.status_code(), 404);

        let invalid: AppError = TodoError::validation("name must not be empty").into();
        assert_eq!(invalid.status_code(), 400);

        let store: AppError = TodoError::store("timeout").into();
        assert_eq!(store.status_code(), 500);

        let storage: AppError = TodoError::from(StorageError::Operation("timeout".to_string())).into();
        assert_eq!(storage.status_code(), 500);

        let bad_key: AppError = TodoError::from(StorageError::InvalidKey(String::new())).into();
        assert_eq!(bad_key.status_code(), 400);
    }
}
