//! Weather fetches for the dashboard.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;

use deskboard_weather::{
    daily_summaries_local, CurrentWeather, DailyForecastSummary, Location, WeatherProvider,
};

use crate::error::ShellError;

/// Everything the weather panel shows for one location.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentWeather,
    pub daily: Vec<DailyForecastSummary>,
}

#[derive(Debug)]
pub enum WeatherServiceMessage {
    FetchDone(Result<WeatherSnapshot, ShellError>),
}

/// Fetch current conditions and the forecast for `location` concurrently.
/// Either failing fails the whole fetch. Sends `FetchDone`.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    location: Location,
) {
    let tx = tx.clone();
    let Ok(runtime) = Handle::try_current() else {
        let _ = tx.send(WeatherServiceMessage::FetchDone(Err(ShellError::NoRuntime)));
        return;
    };

    runtime.spawn(async move {
        let fetched = tokio::try_join!(
            provider.fetch_weather(&location),
            provider.fetch_forecast(&location)
        );
        let result = fetched
            .map(|(current, forecast)| WeatherSnapshot {
                daily: daily_summaries_local(&forecast),
                current,
                location,
            })
            .map_err(ShellError::from);

        if let Err(e) = &result {
            tracing::warn!("Weather fetch failed: {}", e);
        }
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
}
