//! Plain-text rendering of each dashboard panel.

use chrono::{DateTime, Local, Utc};

use deskboard_services::Todo;

use crate::clock::{date_string, format_remaining, time_string};
use crate::error::ShellError;
use crate::models::{NoteModel, TodoModel, WeatherModel};

pub const APP_TITLE: &str = "Deskboard";

const FOOTER_TEXT: &str = "(c) Deskboard";

/// `[✓] 1. text` or `[ ] 1. text`.
pub fn format_todo(todo: &Todo) -> String {
    let status = if todo.done { "[✓]" } else { "[ ]" };
    format!("{} {}. {}", status, todo.id, todo.text)
}

/// [`format_todo`] plus the live countdown when the todo has a timer.
pub fn format_todo_with_timer(todo: &Todo, now: DateTime<Utc>) -> String {
    match &todo.timer {
        Some(timer) => format!(
            "{}  (timer {})",
            format_todo(todo),
            format_remaining(timer.expires_at, now)
        ),
        None => format_todo(todo),
    }
}

pub fn render_header(now: &DateTime<Local>) -> String {
    format!("{}    {}  {}", APP_TITLE, date_string(now), time_string(now))
}

pub fn render_footer() -> String {
    FOOTER_TEXT.to_string()
}

pub fn render_todos(model: &TodoModel, now: DateTime<Utc>) -> Result<String, ShellError> {
    let mut lines = vec!["== Todos ==".to_string()];

    if let Some(error) = model.error() {
        lines.push(format!("! {}", error));
    }

    if model.todos().is_empty() {
        if model.is_loading() {
            lines.push("Loading todos...".to_string());
        } else {
            lines.push("No todos yet. Add one with `deskboard add`.".to_string());
        }
    } else {
        lines.extend(model.todos().iter().map(|t| format_todo_with_timer(t, now)));
    }

    Ok(lines.join("\n"))
}

pub fn render_weather(model: &WeatherModel) -> Result<String, ShellError> {
    let mut lines = vec!["== Weather ==".to_string()];

    let Some(snapshot) = model.snapshot() else {
        if let Some(error) = model.error() {
            return Err(ShellError::WeatherUnavailable(error.to_string()));
        }
        if model.is_loading() {
            lines.push("Loading weather...".to_string());
        } else if let Some(location) = model.location() {
            lines.push(format!("No weather data yet for {}.", location.display_name()));
        } else {
            lines.push(
                "No weather data. Pick a place with `deskboard location search`.".to_string(),
            );
        }
        return Ok(lines.join("\n"));
    };

    lines.push(snapshot.location.display_name());

    let current = &snapshot.current;
    let description = current
        .conditions()
        .map(|c| c.description.as_str())
        .unwrap_or("");
    lines.push(format!("{:.0}°C  {}", current.main.temp.round(), description));

    if !snapshot.daily.is_empty() {
        let row: Vec<String> = snapshot
            .daily
            .iter()
            .map(|day| format!("{} {:.0}°C", day.date.format("%a"), day.temp.round()))
            .collect();
        lines.push(row.join("  "));
    }

    if let Some(error) = model.error() {
        lines.push(format!("(last refresh failed: {})", error));
    }

    Ok(lines.join("\n"))
}

pub fn render_notes(model: &NoteModel) -> Result<String, ShellError> {
    let mut lines = vec!["== Notes ==".to_string()];

    let mut any = false;
    for note in model.visible() {
        any = true;
        lines.push(format!("* {}", note.display_title()));
        lines.push(format!("  {}", note.text));
    }
    if !any {
        lines.push("No notes yet.".to_string());
    }

    Ok(lines.join("\n"))
}
