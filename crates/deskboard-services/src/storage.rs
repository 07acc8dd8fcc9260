//! JSON file storage for the todo collection.
//!
//! The whole collection lives in one pretty-printed JSON array. Every
//! write replaces the file; there is no partial-write protection.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use deskboard_core::StorageError;

use crate::todo::Todo;

/// Reads and writes the todo collection as a single JSON document.
#[derive(Debug, Clone)]
pub struct TodoStorage {
    path: PathBuf,
}

impl TodoStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory and the file exist. Idempotent.
    ///
    /// A missing file is created containing an empty array.
    pub fn init(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        if !self.path.exists() {
            fs::write(&self.path, "[]").map_err(|e| {
                StorageError::Unavailable(format!("{}: {}", self.path.display(), e))
            })?;
            tracing::info!("Created todo file at {}", self.path.display());
        }

        Ok(())
    }

    /// Read the full collection.
    ///
    /// A missing file is recreated and read as empty. A file that exists
    /// but does not parse is an error.
    pub fn read_todos(&self) -> Result<Vec<Todo>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| StorageError::Corruption(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Todo file {} missing, reinitializing",
                    self.path.display()
                );
                self.init()?;
                Ok(Vec::new())
            }
            Err(e) => Err(StorageError::ReadFailed(e.to_string())),
        }
    }

    /// Overwrite the file with the full collection.
    pub fn write_todos(&self, todos: &[Todo]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(todos)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        fs::write(&self.path, json).map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        tracing::debug!("Wrote {} todos to {}", todos.len(), self.path.display());
        Ok(())
    }
}
