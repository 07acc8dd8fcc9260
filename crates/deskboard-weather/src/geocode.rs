//! Forward and reverse geocoding through the OpenWeather geo API.

use tracing::instrument;

use crate::provider::WeatherProvider;
use crate::types::{GeoCandidate, Location, WeatherError};

/// Maximum number of candidates returned by a location search.
pub const SEARCH_LIMIT: usize = 5;

impl WeatherProvider {
    /// Look up places matching `query`, best match first.
    ///
    /// A blank query returns no candidates without touching the network.
    #[instrument(skip(self))]
    pub async fn search_locations(&self, query: &str) -> Result<Vec<GeoCandidate>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/direct", self.geo_url());
        let mut candidates: Vec<GeoCandidate> = self
            .get_json(
                "Location search",
                &url,
                &[("q", query.to_string()), ("limit", SEARCH_LIMIT.to_string())],
            )
            .await?;

        candidates.truncate(SEARCH_LIMIT);
        tracing::debug!("Location search returned {} candidates", candidates.len());
        Ok(candidates)
    }

    /// Name the place at the given coordinates.
    ///
    /// Never fails: when the lookup errors or finds nothing the location is
    /// returned as "Current Location" with an empty country.
    #[instrument(skip(self))]
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Location {
        let url = format!("{}/reverse", self.geo_url());
        let result: Result<Vec<GeoCandidate>, WeatherError> = self
            .get_json(
                "Reverse geocode",
                &url,
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await;

        match result {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(place) => {
                    tracing::info!("Reverse geocoded to: {}, {}", place.name, place.country);
                    Location {
                        lat,
                        lon,
                        name: place.name,
                        country: place.country,
                    }
                }
                None => Location::unnamed(lat, lon),
            },
            Err(e) => {
                tracing::debug!("Reverse geocode failed: {}", e);
                Location::unnamed(lat, lon)
            }
        }
    }
}
