//! To-do items: domain types, request validation and the business-logic layer.
//!
//! The layer assigns identifiers and timestamps on creation and otherwise
//! forwards each action to a [`TodoRepository`] and, for uploads, to the
//! attachment helper.

mod error;
mod service;
mod types;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use error::TodoError;
pub use service::{TodoRepository, TodoService};
pub use types::{CreateTodoRequest, MAX_NAME_LEN, TodoItem, TodoUpdate, UpdateTodoRequest};
