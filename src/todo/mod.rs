//! Todo list widget model and its injected key-value persistence.

pub mod item;
pub mod storage;

pub use item::{default_items, TodoItem, TodoList, TODOS_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
