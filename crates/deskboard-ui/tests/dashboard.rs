//! Dashboard against mocked todo and weather servers.

use std::time::Duration;

use chrono::Local;
use deskboard_services::TodoClient;
use deskboard_ui::{Dashboard, LocalStore};
use deskboard_weather::{Location, WeatherProvider};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard(server: &MockServer, store_dir: &std::path::Path, api_key: Option<&str>) -> Dashboard {
    let todo_client = TodoClient::new(&server.uri()).unwrap();
    let provider = WeatherProvider::new(
        api_key.map(str::to_string),
        &format!("{}/data/2.5", server.uri()),
        &format!("{}/geo/1.0", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap();
    Dashboard::new(
        todo_client,
        provider,
        LocalStore::new(store_dir.join("local.json")),
        40,
    )
}

fn oslo() -> Location {
    Location {
        lat: 59.91,
        lon: 10.75,
        name: "Oslo".to_string(),
        country: "NO".to_string(),
    }
}

async fn mount_todos(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "text": "Buy milk", "done": false, "created": "2026-10-18T08:00:00Z", "timer": null },
            { "id": 2, "text": "Call mum", "done": true, "created": "2026-10-18T08:05:00Z", "timer": null }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_renders_todos_and_weather() {
    let server = MockServer::start().await;
    mount_todos(&server).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Oslo",
            "dt": 1760788800,
            "main": { "temp": 7.2 },
            "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(&server, dir.path(), Some("key"));
    dashboard.set_location(oslo()).unwrap();
    dashboard.refresh();
    dashboard.settle(Duration::from_secs(5)).await;

    let out = dashboard.render(Local::now());
    assert!(out.contains("[ ] 1. Buy milk"), "{}", out);
    assert!(out.contains("[✓] 2. Call mum"), "{}", out);
    assert!(out.contains("Oslo, NO"), "{}", out);
    assert!(out.contains("7°C  light rain"), "{}", out);
}

#[tokio::test]
async fn test_weather_failure_stays_inline() {
    let server = MockServer::start().await;
    mount_todos(&server).await;

    let dir = tempfile::tempdir().unwrap();
    // No API key: the weather fetch fails before any request
    let mut dashboard = dashboard(&server, dir.path(), None);
    dashboard.set_location(oslo()).unwrap();
    dashboard.refresh();
    dashboard.settle(Duration::from_secs(5)).await;

    let out = dashboard.render(Local::now());
    assert!(
        out.contains("Weather unavailable: No weather API key configured"),
        "{}",
        out
    );
    assert!(out.contains("[ ] 1. Buy milk"), "{}", out);
}

#[tokio::test]
async fn test_location_is_rehydrated() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut first = dashboard(&server, dir.path(), None);
    first.set_location(oslo()).unwrap();

    let second = dashboard(&server, dir.path(), None);
    assert_eq!(second.weather().location(), Some(&oslo()));
}

#[tokio::test]
async fn test_mutations_wait_for_server() {
    let server = MockServer::start().await;
    mount_todos(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/9/done"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Todo with id 9 not found" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(&server, dir.path(), None);
    dashboard.refresh();
    dashboard.settle(Duration::from_secs(5)).await;
    assert_eq!(dashboard.todos().todos().len(), 2);

    dashboard.delete_todo(1);
    // Nothing changes until the response is applied
    assert_eq!(dashboard.todos().todos().len(), 2);
    dashboard.settle(Duration::from_secs(5)).await;

    let todos = dashboard.todos().todos();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, 1);
    assert_eq!(todos[0].text, "Call mum");

    dashboard.mark_done(9);
    dashboard.settle(Duration::from_secs(5)).await;
    assert_eq!(dashboard.todos().todos().len(), 1);
    assert!(dashboard
        .todos()
        .error()
        .unwrap()
        .contains("Todo with id 9 not found"));
}
