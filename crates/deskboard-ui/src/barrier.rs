//! Fault barrier around view rendering.
//!
//! A view that fails or panics is replaced by a short fallback so the rest
//! of the dashboard keeps drawing.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ShellError;

pub const GENERIC_FALLBACK: &str = "Something went wrong.";

/// Run `render` and return its output, or a fallback if it fails.
pub fn guard<F>(view: &str, render: F) -> String
where
    F: FnOnce() -> Result<String, ShellError>,
{
    match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.is_weather() => {
            tracing::warn!(view = view, "Weather view failed: {}", e);
            format!("Weather unavailable: {}", e)
        }
        Ok(Err(e)) => {
            tracing::error!(view = view, "View failed: {}", e);
            format!("{}\n{}", GENERIC_FALLBACK, e)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(view = view, "View panicked: {}", message);
            format!("{}\n{}", GENERIC_FALLBACK, message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
