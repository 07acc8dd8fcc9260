//! Weather service for Deskboard
//!
//! Fetches current conditions and the 5-day/3-hour forecast from
//! OpenWeather, resolves locations through its geocoding API and reduces
//! the forecast to one entry per calendar day.

pub mod geocode;
pub mod provider;
pub mod summary;
pub mod types;

pub use provider::WeatherProvider;
pub use summary::{daily_summaries, daily_summaries_local, MAX_SUMMARY_DAYS};
pub use types::*;
