//! In-memory item store
//!
//! Holds the authoritative list of todo items. Lookups are linear scans over
//! a `Vec`, which keeps insertion order for `list()`. The store is a cheap
//! cloneable handle; every clone shares the same list.

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::domain::TodoItem;

#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: Arc<RwLock<Vec<TodoItem>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `items`, keeping their identifiers
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// All items in insertion order
    pub async fn list(&self) -> Vec<TodoItem> {
        self.items.read().await.clone()
    }

    /// Append a new item under a freshly generated identifier
    pub async fn create(&self, title: Option<String>, completed: bool) -> TodoItem {
        let item = TodoItem {
            id: Uuid::new_v4(),
            title,
            completed,
        };
        self.items.write().await.push(item.clone());
        item
    }

    pub async fn get(&self, id: Uuid) -> Option<TodoItem> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Overwrite title and completion flag of an existing item
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        completed: bool,
    ) -> Option<TodoItem> {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|item| item.id == id)?;
        item.title = title;
        item.completed = completed;
        Some(item.clone())
    }

    /// Set only the completion flag, leaving the title untouched.
    ///
    /// Lookup and write happen under a single write lock.
    pub async fn set_completed(&self, id: Uuid, completed: bool) -> Option<TodoItem> {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|item| item.id == id)?;
        item.completed = completed;
        Some(item.clone())
    }

    /// Remove an item. Returns `false` and leaves the store untouched when
    /// no item has this identifier.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
