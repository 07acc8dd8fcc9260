//! Dashboard errors and their mapping into [`AppError`].

use thiserror::Error;

use deskboard_core::{AppError, NetworkError, StorageError};
use deskboard_weather::WeatherError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Todo request failed: {0}")]
    Todo(#[from] NetworkError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// A weather failure already reduced to its message.
    #[error("{0}")]
    WeatherUnavailable(String),

    #[error("No location selected")]
    NoLocation,

    /// A request was issued outside a tokio runtime.
    #[error("Async runtime not available")]
    NoRuntime,

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Weather failures render inline instead of as a generic error.
    pub fn is_weather(&self) -> bool {
        matches!(
            self,
            ShellError::Weather(_) | ShellError::WeatherUnavailable(_)
        )
    }
}

impl From<ShellError> for AppError {
    fn from(e: ShellError) -> Self {
        match e {
            ShellError::Todo(e) => AppError::Network(e),
            ShellError::Weather(e) => e.into(),
            ShellError::WeatherUnavailable(msg) => AppError::Upstream(msg),
            e @ ShellError::NoLocation => AppError::Validation(e.to_string()),
            e @ ShellError::NoRuntime => AppError::Other(anyhow::anyhow!(e.to_string())),
            ShellError::Storage(e) => AppError::Storage(e),
            ShellError::Io(e) => AppError::Io(e),
        }
    }
}
