//! Todo business logic over [`TodoStorage`].
//!
//! Ids are the 1-based positions of the items in the stored array: `add`
//! assigns `len + 1` and `delete` renumbers everything after the removed
//! item. Clients holding an id across a delete of an earlier item will
//! address a different todo afterwards.

use chrono::{DateTime, Utc};
use thiserror::Error;

use deskboard_core::{AppError, StorageError};

use crate::storage::TodoStorage;
use crate::todo::{Timer, Todo};

/// Errors that can occur during todo operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Input was rejected (e.g. empty text).
    #[error("{0}")]
    Validation(String),

    /// No todo has the requested id.
    #[error("Todo with id {0} not found")]
    NotFound(u64),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The operation failed for a reason unrelated to its input or the file,
    /// such as a panic in the worker task.
    #[error("Unexpected todo failure: {0}")]
    Internal(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<TodoError> for AppError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::Validation(msg) => AppError::Validation(msg),
            TodoError::NotFound(id) => AppError::NotFound(format!("todo {}", id)),
            TodoError::Storage(e) => AppError::Storage(e),
            TodoError::Internal(msg) => AppError::Other(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for todo operations.
pub type TodoResult<T> = Result<T, TodoError>;

/// Todo operations backed by a JSON file.
#[derive(Debug, Clone)]
pub struct TodoList {
    storage: TodoStorage,
    clock: fn() -> DateTime<Utc>,
}

impl TodoList {
    pub fn new(storage: TodoStorage) -> Self {
        Self::with_clock(storage, Utc::now)
    }

    /// Use a custom time source for `created` and timer expiry.
    pub fn with_clock(storage: TodoStorage, clock: fn() -> DateTime<Utc>) -> Self {
        Self { storage, clock }
    }

    /// Ensure the backing file exists.
    pub fn init(&self) -> TodoResult<()> {
        self.storage.init()?;
        Ok(())
    }

    pub fn storage(&self) -> &TodoStorage {
        &self.storage
    }

    /// Append a new todo.
    ///
    /// # Errors
    /// Returns `TodoError::Validation` if `text` is empty or only whitespace,
    /// or if the timer would expire past the last representable date.
    pub fn add(&self, text: &str, timer_minutes: Option<f64>) -> TodoResult<Todo> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::validation("Todo text is required"));
        }

        let now = (self.clock)();
        let timer = match timer_minutes {
            Some(minutes) => Timer::try_starting_at(now, minutes)
                .map_err(|e| TodoError::validation(e.to_string()))?,
            None => None,
        };

        let mut todos = self.storage.read_todos()?;
        let todo = Todo {
            id: todos.len() as u64 + 1,
            text: text.to_string(),
            done: false,
            created: now,
            timer,
        };

        todos.push(todo.clone());
        self.storage.write_todos(&todos)?;

        tracing::debug!("Added todo {} (timer: {})", todo.id, todo.timer.is_some());
        Ok(todo)
    }

    /// All todos in creation order.
    pub fn list(&self) -> TodoResult<Vec<Todo>> {
        Ok(self.storage.read_todos()?)
    }

    /// Mark a todo as done. Marking an already-done todo succeeds unchanged.
    ///
    /// # Errors
    /// Returns `TodoError::NotFound` if no todo has that id.
    pub fn done(&self, id: u64) -> TodoResult<Todo> {
        let mut todos = self.storage.read_todos()?;

        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(TodoError::NotFound(id))?;
        todo.done = true;
        let updated = todo.clone();

        self.storage.write_todos(&todos)?;

        tracing::debug!("Marked todo {} as done", id);
        Ok(updated)
    }

    /// Remove a todo and renumber the rest to `1..N-1`.
    ///
    /// # Errors
    /// Returns `TodoError::NotFound` if no todo has that id.
    pub fn delete(&self, id: u64) -> TodoResult<()> {
        let mut todos = self.storage.read_todos()?;

        let index = todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(TodoError::NotFound(id))?;
        todos.remove(index);

        for (position, todo) in todos.iter_mut().enumerate() {
            todo.id = position as u64 + 1;
        }

        self.storage.write_todos(&todos)?;

        tracing::debug!("Deleted todo {}, {} remaining", id, todos.len());
        Ok(())
    }
}
