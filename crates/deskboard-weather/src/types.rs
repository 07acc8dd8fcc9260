use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use deskboard_core::AppError;

/// Name used when reverse geocoding cannot name the coordinates.
pub const FALLBACK_LOCATION_NAME: &str = "Current Location";

/// Selected location driving weather fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    #[serde(default)]
    pub country: String,
}

impl Location {
    /// Location at the given coordinates with the fallback name.
    pub fn unnamed(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            name: FALLBACK_LOCATION_NAME.to_string(),
            country: String::new(),
        }
    }

    /// "Name, CC" or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// One entry of the `weather` array in OpenWeather responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl Conditions {
    /// OpenWeather CDN URL for the condition icon.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// The `main` block: temperatures in the requested units (metric).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

/// `GET /data/2.5/weather`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: String,
    pub dt: i64,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Conditions>,
}

impl CurrentWeather {
    pub fn conditions(&self) -> Option<&Conditions> {
        self.weather.first()
    }
}

/// One 3-hour sample of the forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds, UTC)
    pub dt: i64,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Conditions>,
}

impl ForecastEntry {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.dt, 0).single()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// `GET /data/2.5/forecast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

/// A forward or reverse geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<GeoCandidate> for Location {
    fn from(candidate: GeoCandidate) -> Self {
        Self {
            lat: candidate.lat,
            lon: candidate.lon,
            name: candidate.name,
            country: candidate.country,
        }
    }
}

/// One representative forecast sample for a calendar day.
///
/// The sample is simply the first one the forecast lists for that day,
/// not a minimum, maximum or average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastSummary {
    pub date: NaiveDate,
    pub temp: f64,
    pub description: String,
    pub icon: String,
    pub sampled_at: DateTime<Utc>,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No weather API key configured")]
    MissingApiKey,
    #[error("{operation} failed with status {status}: {message}")]
    Upstream {
        operation: &'static str,
        status: u16,
        message: String,
    },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => "Weather API key is not configured.",
            WeatherError::Upstream { status: 401, .. } => "Weather API key is invalid.",
            WeatherError::Upstream { .. } => "Weather service error. Please try again later.",
            WeatherError::Network(_) => "Unable to reach the weather service.",
            WeatherError::Parse(_) => "The weather service sent an unexpected response.",
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        AppError::Upstream(e.to_string())
    }
}
