use deskboard_weather::Location;

use crate::services::{WeatherServiceMessage, WeatherSnapshot};

/// Selected location plus the last successful fetch for it.
#[derive(Debug, Default)]
pub struct WeatherModel {
    location: Option<Location>,
    snapshot: Option<WeatherSnapshot>,
    loading: bool,
    error: Option<String>,
}

impl WeatherModel {
    pub fn new(location: Option<Location>) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch location. The previous snapshot stays until the new one lands.
    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn apply(&mut self, msg: WeatherServiceMessage) {
        match msg {
            WeatherServiceMessage::FetchDone(result) => {
                self.loading = false;
                match result {
                    Ok(snapshot) => {
                        // A slow response for a previous location is dropped
                        if self.location.as_ref() == Some(&snapshot.location) {
                            self.snapshot = Some(snapshot);
                            self.error = None;
                        } else {
                            tracing::debug!("Dropping weather for a stale location");
                        }
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use deskboard_weather::{CurrentWeather, Readings};

    fn place(name: &str, lat: f64) -> Location {
        Location {
            lat,
            lon: 0.0,
            name: name.to_string(),
            country: String::new(),
        }
    }

    fn snapshot(location: Location) -> WeatherSnapshot {
        WeatherSnapshot {
            location,
            current: CurrentWeather {
                name: "Somewhere".to_string(),
                dt: 0,
                main: Readings {
                    temp: 20.0,
                    feels_like: None,
                    humidity: None,
                },
                weather: Vec::new(),
            },
            daily: Vec::new(),
        }
    }

    #[test]
    fn test_fetch_success_stores_snapshot() {
        let mut model = WeatherModel::new(Some(place("A", 1.0)));
        model.begin_fetch();
        model.apply(WeatherServiceMessage::FetchDone(Ok(snapshot(place("A", 1.0)))));

        assert!(!model.is_loading());
        assert_eq!(model.snapshot().unwrap().current.main.temp, 20.0);
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut model = WeatherModel::new(Some(place("A", 1.0)));
        model.apply(WeatherServiceMessage::FetchDone(Ok(snapshot(place("A", 1.0)))));

        model.apply(WeatherServiceMessage::FetchDone(Err(
            ShellError::WeatherUnavailable("rate limited".into()),
        )));

        assert!(model.snapshot().is_some());
        assert_eq!(model.error(), Some("rate limited"));
    }

    #[test]
    fn test_stale_location_is_ignored() {
        let mut model = WeatherModel::new(Some(place("A", 1.0)));
        model.set_location(place("B", 2.0));
        model.apply(WeatherServiceMessage::FetchDone(Ok(snapshot(place("A", 1.0)))));

        assert!(model.snapshot().is_none());
        assert_eq!(model.location().unwrap().name, "B");
    }
}
