//! Todo API calls for the dashboard.
//! Each request runs on a tokio task; the result comes back on the channel.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;

use deskboard_services::{Todo, TodoClient, TodoCreateRequest};

use crate::error::ShellError;

/// Results sent back from todo requests
#[derive(Debug)]
pub enum TodoServiceMessage {
    FetchDone(Result<Vec<Todo>, ShellError>),
    CreateDone(Result<Todo, ShellError>),
    MarkDoneDone {
        id: u64,
        result: Result<Todo, ShellError>,
    },
    DeleteDone {
        id: u64,
        result: Result<(), ShellError>,
    },
}

/// Fetch every todo. Sends `FetchDone`.
pub fn request_fetch(tx: &Sender<TodoServiceMessage>, client: Arc<TodoClient>) {
    let tx = tx.clone();
    let Ok(runtime) = Handle::try_current() else {
        let _ = tx.send(TodoServiceMessage::FetchDone(Err(ShellError::NoRuntime)));
        return;
    };

    runtime.spawn(async move {
        let result = client.list_todos().await.map_err(ShellError::from);
        let _ = tx.send(TodoServiceMessage::FetchDone(result));
    });
}

/// Create a todo. Sends `CreateDone`.
pub fn request_create(
    tx: &Sender<TodoServiceMessage>,
    client: Arc<TodoClient>,
    text: String,
    timer_minutes: Option<f64>,
) {
    let tx = tx.clone();
    let Ok(runtime) = Handle::try_current() else {
        let _ = tx.send(TodoServiceMessage::CreateDone(Err(ShellError::NoRuntime)));
        return;
    };

    runtime.spawn(async move {
        let request = TodoCreateRequest {
            text,
            timer_minutes,
        };
        let result = client
            .create_todo(&request)
            .await
            .map_err(ShellError::from);
        let _ = tx.send(TodoServiceMessage::CreateDone(result));
    });
}

/// Mark a todo done. Sends `MarkDoneDone`.
pub fn request_done(tx: &Sender<TodoServiceMessage>, client: Arc<TodoClient>, id: u64) {
    let tx = tx.clone();
    let Ok(runtime) = Handle::try_current() else {
        let _ = tx.send(TodoServiceMessage::MarkDoneDone {
            id,
            result: Err(ShellError::NoRuntime),
        });
        return;
    };

    runtime.spawn(async move {
        let result = client.mark_done(id).await.map_err(ShellError::from);
        let _ = tx.send(TodoServiceMessage::MarkDoneDone { id, result });
    });
}

/// Delete a todo. Sends `DeleteDone`.
pub fn request_delete(tx: &Sender<TodoServiceMessage>, client: Arc<TodoClient>, id: u64) {
    let tx = tx.clone();
    let Ok(runtime) = Handle::try_current() else {
        let _ = tx.send(TodoServiceMessage::DeleteDone {
            id,
            result: Err(ShellError::NoRuntime),
        });
        return;
    };

    runtime.spawn(async move {
        let result = client.delete_todo(id).await.map_err(ShellError::from);
        let _ = tx.send(TodoServiceMessage::DeleteDone { id, result });
    });
}
