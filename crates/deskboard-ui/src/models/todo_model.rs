//! Todo list state for the dashboard.
//!
//! The list only changes when the server confirms a request.

use deskboard_services::Todo;

use crate::error::ShellError;
use crate::services::TodoServiceMessage;

#[derive(Debug, Default)]
pub struct TodoModel {
    todos: Vec<Todo>,
    pending: usize,
    error: Option<String>,
}

impl TodoModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Last request failure, cleared by the next request.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Note that a request is in flight.
    pub fn begin_request(&mut self) {
        self.pending += 1;
        self.error = None;
    }

    pub fn apply(&mut self, msg: TodoServiceMessage) {
        self.pending = self.pending.saturating_sub(1);

        match msg {
            TodoServiceMessage::FetchDone(result) => match result {
                Ok(todos) => self.todos = todos,
                Err(e) => self.set_error(&e),
            },
            TodoServiceMessage::CreateDone(result) => match result {
                Ok(todo) => self.todos.push(todo),
                Err(e) => self.set_error(&e),
            },
            TodoServiceMessage::MarkDoneDone { id, result } => match result {
                Ok(updated) => {
                    if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                        *todo = updated;
                    }
                }
                Err(e) => self.set_error(&e),
            },
            TodoServiceMessage::DeleteDone { id, result } => match result {
                Ok(()) => self.remove_and_renumber(id),
                Err(e) => self.set_error(&e),
            },
        }
    }

    /// Mirror the server: remaining ids become their 1-based positions.
    fn remove_and_renumber(&mut self, id: u64) {
        self.todos.retain(|t| t.id != id);
        for (index, todo) in self.todos.iter_mut().enumerate() {
            todo.id = index as u64 + 1;
        }
    }

    fn set_error(&mut self, e: &ShellError) {
        tracing::warn!("Todo request failed: {}", e);
        self.error = Some(e.to_string());
    }
}
