//! Async, single-writer access to a [`TodoList`].
//!
//! Every operation is a full read-modify-write of the todo file. The mutex
//! serializes those cycles within the process; the blocking file I/O runs
//! on tokio's blocking pool.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinError;

use deskboard_core::StorageError;

use crate::storage::TodoStorage;
use crate::todo::Todo;
use crate::todo_list::{TodoError, TodoList, TodoResult};

#[derive(Clone)]
pub struct TodoService {
    list: Arc<Mutex<TodoList>>,
}

impl TodoService {
    pub fn new(list: TodoList) -> Self {
        Self {
            list: Arc::new(Mutex::new(list)),
        }
    }

    /// Open (and create if needed) the todo file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> TodoResult<Self> {
        let list = TodoList::new(TodoStorage::new(path));
        list.init()?;
        Ok(Self::new(list))
    }

    pub async fn list(&self) -> TodoResult<Vec<Todo>> {
        self.run(|list| list.list()).await
    }

    pub async fn add(&self, text: String, timer_minutes: Option<f64>) -> TodoResult<Todo> {
        self.run(move |list| list.add(&text, timer_minutes)).await
    }

    pub async fn done(&self, id: u64) -> TodoResult<Todo> {
        self.run(move |list| list.done(id)).await
    }

    pub async fn delete(&self, id: u64) -> TodoResult<()> {
        self.run(move |list| list.delete(id)).await
    }

    async fn run<T, F>(&self, op: F) -> TodoResult<T>
    where
        F: FnOnce(&TodoList) -> TodoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let list = self.list.clone();
        tokio::task::spawn_blocking(move || {
            let guard = list.lock();
            op(&*guard)
        })
        .await
        .map_err(join_error)?
    }
}

fn join_error(e: JoinError) -> TodoError {
    if e.is_panic() {
        tracing::error!("Todo operation panicked: {}", e);
        TodoError::Internal("todo operation panicked".to_string())
    } else {
        tracing::error!("Todo storage task was cancelled: {}", e);
        TodoError::Storage(StorageError::Unavailable(format!(
            "storage task cancelled: {}",
            e
        )))
    }
}
