pub mod todo_service;
pub mod weather_service;

pub use todo_service::{
    request_create as request_todo_create, request_delete as request_todo_delete,
    request_done as request_todo_done, request_fetch as request_todo_fetch, TodoServiceMessage,
};
pub use weather_service::{
    request_fetch as request_weather_fetch, WeatherServiceMessage, WeatherSnapshot,
};
