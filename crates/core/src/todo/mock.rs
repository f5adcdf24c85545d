//! In-memory repository for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use todo_shared::{OwnerId, TodoId};

use super::error::TodoError;
use super::service::TodoRepository;
use super::types::{CreateTodoRequest, TodoItem, TodoUpdate};

type Key = (OwnerId, TodoId);

/// Mock repository with the same key and condition semantics as the table.
pub struct MockTodoRepository {
    items: Mutex<BTreeMap<Key, TodoItem>>,
    fail: bool,
}

impl MockTodoRepository {
    /// An empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            fail: false,
        }
    }

    /// A repository whose every call fails with a store error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            fail: true,
        }
    }

    /// Insert a fresh item for `owner` and return it.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    pub fn seed(&self, owner: &str, name: &str) -> TodoItem {
        let request = CreateTodoRequest {
            name: name.to_string(),
            due_date: None,
        };
        let item = TodoItem::new(request, owner.into());
        self.items.lock().unwrap().insert(
            (item.owner_id.clone(), item.item_id.clone()),
            item.clone(),
        );
        item
    }

    /// Look up a stored item.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn get(&self, owner_id: &OwnerId, item_id: &TodoId) -> Option<TodoItem> {
        self.items
            .lock()
            .unwrap()
            .get(&(owner_id.clone(), item_id.clone()))
            .cloned()
    }

    /// Every stored item, in key order.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.items.lock().unwrap().values().cloned().collect()
    }

    /// Returns true if nothing is stored.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    fn check(&self) -> Result<(), TodoError> {
        if self.fail {
            Err(TodoError::store("service unavailable"))
        } else {
            Ok(())
        }
    }

    fn modify(
        &self,
        owner_id: &OwnerId,
        item_id: &TodoId,
        f: impl FnOnce(&mut TodoItem),
    ) -> Result<(), TodoError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(&(owner_id.clone(), item_id.clone()))
            .ok_or_else(|| TodoError::conditional_check(item_id.clone()))?;
        f(item);
        Ok(())
    }
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoRepository for MockTodoRepository {
    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<TodoItem>, TodoError> {
        self.check()?;
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| &item.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, item: TodoItem) -> Result<TodoItem, TodoError> {
        self.check()?;
        self.items.lock().unwrap().insert(
            (item.owner_id.clone(), item.item_id.clone()),
            item.clone(),
        );
        Ok(item)
    }

    async fn update(
        &self,
        update: &TodoUpdate,
        owner_id: &OwnerId,
        item_id: &TodoId,
    ) -> Result<(), TodoError> {
        self.modify(owner_id, item_id, |item| {
            item.name.clone_from(&update.name);
            item.due_date.clone_from(&update.due_date);
            item.done = update.done;
        })
    }

    async fn set_attachment_url(
        &self,
        owner_id: &OwnerId,
        item_id: &TodoId,
        url: &str,
    ) -> Result<(), TodoError> {
        self.modify(owner_id, item_id, |item| {
            item.attachment_url = Some(url.to_string());
        })
    }

    async fn delete(&self, owner_id: &OwnerId, item_id: &TodoId) -> Result<(), TodoError> {
        self.check()?;
        self.items
            .lock()
            .unwrap()
            .remove(&(owner_id.clone(), item_id.clone()));
        Ok(())
    }
}
