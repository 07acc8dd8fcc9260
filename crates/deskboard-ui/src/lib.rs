//! Terminal dashboard: todos, weather, notes and a clock.
//!
//! Network work runs on tokio tasks under `services`, which report back
//! over channels; `models` hold view state and are only mutated when a
//! result arrives. `Dashboard` ties them together and renders text.

pub mod barrier;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod local_store;
pub mod models;
pub mod scroll;
pub mod services;
pub mod views;

pub use dashboard::Dashboard;
pub use error::ShellError;
pub use local_store::LocalStore;
pub use models::{Note, NoteModel, TodoModel, WeatherModel};
pub use scroll::{ScrollMetrics, ScrollTracker};
