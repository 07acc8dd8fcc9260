//! Integration tests for WeatherProvider against a mock OpenWeather server.

use std::time::Duration;

use deskboard_weather::{Location, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(
        Some("test-key".to_string()),
        &format!("{}/data/2.5", server.uri()),
        &format!("{}/geo/1.0", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn london() -> Location {
    Location {
        lat: 51.5074,
        lon: -0.1278,
        name: "London".to_string(),
        country: "GB".to_string(),
    }
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5074"))
        .and(query_param("lon", "-0.1278"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "London",
            "dt": 1760788800,
            "main": { "temp": 14.2, "feels_like": 13.1, "humidity": 71 },
            "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let weather = provider_for(&server).fetch_weather(&london()).await.unwrap();

    assert_eq!(weather.name, "London");
    assert_eq!(weather.main.temp, 14.2);
    assert_eq!(weather.conditions().unwrap().description, "broken clouds");
}

#[tokio::test]
async fn test_fetch_forecast_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                { "dt": 1760788800, "main": { "temp": 10.0 }, "weather": [{ "description": "clear sky", "icon": "01d" }] },
                { "dt": 1760799600, "main": { "temp": 11.0 }, "weather": [{ "description": "clear sky", "icon": "01d" }] }
            ],
            "city": { "name": "London", "country": "GB" }
        })))
        .mount(&server)
        .await;

    let forecast = provider_for(&server).fetch_forecast(&london()).await.unwrap();
    assert_eq!(forecast.list.len(), 2);
    assert_eq!(forecast.list[1].main.temp, 11.0);
}

#[tokio::test]
async fn test_non_success_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .fetch_weather(&london())
        .await
        .unwrap_err();

    match err {
        WeatherError::Upstream {
            operation,
            status,
            message,
        } => {
            assert_eq!(operation, "Weather fetch");
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .fetch_forecast(&london())
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_search_locations_limits_to_five() {
    let server = MockServer::start().await;

    let candidates: Vec<serde_json::Value> = (0..7)
        .map(|i| {
            serde_json::json!({
                "name": format!("Springfield {}", i),
                "lat": 39.0 + i as f64,
                "lon": -89.0,
                "country": "US",
                "state": "Illinois"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfield"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates))
        .expect(1)
        .mount(&server)
        .await;

    let results = provider_for(&server)
        .search_locations("  Springfield ")
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].name, "Springfield 0");
    assert_eq!(results[0].state.as_deref(), Some("Illinois"));
}

#[tokio::test]
async fn test_blank_search_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let results = provider_for(&server).search_locations("   ").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_reverse_geocode_names_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Camden Town", "lat": 51.54, "lon": -0.14, "country": "GB" }
        ])))
        .mount(&server)
        .await;

    let location = provider_for(&server).reverse_geocode(51.5, -0.1).await;

    assert_eq!(location.name, "Camden Town");
    assert_eq!(location.country, "GB");
    // Coordinates stay the ones we asked about
    assert_eq!(location.lat, 51.5);
    assert_eq!(location.lon, -0.1);
}

#[tokio::test]
async fn test_reverse_geocode_falls_back_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let location = provider_for(&server).reverse_geocode(10.0, 20.0).await;
    assert_eq!(location, Location::unnamed(10.0, 20.0));
}

#[tokio::test]
async fn test_reverse_geocode_falls_back_on_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let location = provider_for(&server).reverse_geocode(0.0, 0.0).await;
    assert_eq!(location.name, "Current Location");
    assert_eq!(location.country, "");
}
