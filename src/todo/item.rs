use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use super::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized list
pub const TODOS_KEY: &str = "todos";

/// A single entry of the todo list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed,
        }
    }
}

/// Entries shown on first use, before anything was saved
pub fn default_items() -> Vec<TodoItem> {
    vec![
        TodoItem::new("1", "Learn React", true),
        TodoItem::new("2", "Build a Todo App", false),
        TodoItem::new("3", "Add styling with Tailwind", false),
    ]
}

/// Ordered todo list, written back to its storage after every change
pub struct TodoList<S: KeyValueStorage> {
    items: Vec<TodoItem>,
    storage: S,
}

impl<S: KeyValueStorage> TodoList<S> {
    /// Load the list from `storage`, seeding the defaults when nothing is stored.
    ///
    /// A stored value that does not parse is an error.
    pub fn load(mut storage: S) -> Result<Self, StorageError> {
        let items = match storage.get(TODOS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| StorageError::Json {
                key: TODOS_KEY.to_string(),
                source,
            })?,
            None => default_items(),
        };
        info!(count = items.len(), "todo list loaded");

        write(&mut storage, &items)?;
        Ok(Self { items, storage })
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a new open item. Blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Result<Option<&TodoItem>, StorageError> {
        self.add_at(text, unix_millis())
    }

    /// `add` with an explicit id clock, bumped until the id is unused
    pub fn add_at(
        &mut self,
        text: &str,
        mut millis: u128,
    ) -> Result<Option<&TodoItem>, StorageError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        while self.position(&millis.to_string()).is_some() {
            millis += 1;
        }

        let mut next = self.items.clone();
        next.push(TodoItem::new(millis.to_string(), text, false));
        self.commit(next)?;
        info!(id = %millis, "todo added");
        Ok(self.items.last())
    }

    /// Flip completion of the item with `id`. Unknown ids change nothing.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.items.clone();
        next[index].completed = !next[index].completed;
        let completed = next[index].completed;
        self.commit(next)?;
        debug!(id, completed, "todo toggled");
        Ok(true)
    }

    /// Remove and return the item with `id`
    pub fn remove(&mut self, id: &str) -> Result<Option<TodoItem>, StorageError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.items.clone();
        let item = next.remove(index);
        self.commit(next)?;
        info!(id, "todo removed");
        Ok(Some(item))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Persist `next`, and only once that succeeded make it the current list
    fn commit(&mut self, next: Vec<TodoItem>) -> Result<(), StorageError> {
        write(&mut self.storage, &next)?;
        self.items = next;
        Ok(())
    }
}

fn write<S: KeyValueStorage>(storage: &mut S, items: &[TodoItem]) -> Result<(), StorageError> {
    let json = serde_json::to_string(items).map_err(|source| StorageError::Json {
        key: TODOS_KEY.to_string(),
        source,
    })?;
    storage.set(TODOS_KEY, &json)?;
    debug!(count = items.len(), "todo list saved");
    Ok(())
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
