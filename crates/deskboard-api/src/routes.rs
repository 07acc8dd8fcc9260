//! Warp filters for the todo endpoints.
//!
//! | Method | Path                  | Success            |
//! |--------|-----------------------|--------------------|
//! | GET    | `/api/todos`          | 200, array of Todo |
//! | POST   | `/api/todos`          | 201, created Todo  |
//! | PUT    | `/api/todos/:id/done` | 200, updated Todo  |
//! | DELETE | `/api/todos/:id`      | 204, empty body    |
//!
//! Every failure is answered with `{"error": "..."}`.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use deskboard_services::{TodoError, TodoService};

const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Storage details are logged, never sent to the client.
const STORAGE_FAILURE_MESSAGE: &str = "Failed to access todo storage";

const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

/// `POST /api/todos` body. Fields are loosely typed so a wrong type is
/// reported as a validation error rather than a parse error.
#[derive(Debug, Deserialize)]
struct CreateTodoBody {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default, rename = "timerMinutes")]
    timer_minutes: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// All API routes with CORS, rejection handling and request logging applied.
pub fn routes(
    service: TodoService,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_header("content-type");

    // Path before method, so a bad id is a 404 and a bad verb a 405
    let list = warp::path!("api" / "todos")
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(list_todos);

    let create = warp::path!("api" / "todos")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(create_todo);

    let done = warp::path!("api" / "todos" / u64 / "done")
        .and(warp::put())
        .and(with_service(service.clone()))
        .and_then(mark_done);

    let delete = warp::path!("api" / "todos" / u64)
        .and(warp::delete())
        .and(with_service(service))
        .and_then(delete_todo);

    list.or(create)
        .unify()
        .or(done)
        .unify()
        .or(delete)
        .unify()
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log::custom(log_request))
}

fn with_service(
    service: TodoService,
) -> impl Filter<Extract = (TodoService,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

async fn list_todos(service: TodoService) -> Result<Response, Infallible> {
    Ok(match service.list().await {
        Ok(todos) => warp::reply::json(&todos).into_response(),
        Err(e) => todo_error_response(e),
    })
}

async fn create_todo(body: CreateTodoBody, service: TodoService) -> Result<Response, Infallible> {
    let text = match body.text {
        Some(Value::String(text)) => text,
        Some(_) => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "Todo text must be a string",
            ))
        }
        None => return Ok(error_response(StatusCode::BAD_REQUEST, "Todo text is required")),
    };

    let timer_minutes = coerce_minutes(body.timer_minutes.as_ref());

    Ok(match service.add(text, timer_minutes).await {
        Ok(todo) => {
            tracing::info!("Created todo {}", todo.id);
            warp::reply::with_status(warp::reply::json(&todo), StatusCode::CREATED)
                .into_response()
        }
        Err(e) => todo_error_response(e),
    })
}

async fn mark_done(id: u64, service: TodoService) -> Result<Response, Infallible> {
    Ok(match service.done(id).await {
        Ok(todo) => warp::reply::json(&todo).into_response(),
        Err(e) => todo_error_response(e),
    })
}

async fn delete_todo(id: u64, service: TodoService) -> Result<Response, Infallible> {
    Ok(match service.delete(id).await {
        Ok(()) => {
            tracing::info!("Deleted todo {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => todo_error_response(e),
    })
}

/// `timerMinutes` as a number: JSON numbers and numeric strings are
/// accepted, anything else means no timer. Range checks happen in the
/// todo list.
fn coerce_minutes(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn todo_error_response(err: TodoError) -> Response {
    match &err {
        TodoError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        TodoError::NotFound(_) => error_response(StatusCode::NOT_FOUND, &err.to_string()),
        TodoError::Storage(e) => {
            tracing::error!("Todo storage failure: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, STORAGE_FAILURE_MESSAGE)
        }
        TodoError::Internal(e) => {
            tracing::error!("Todo operation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_FAILURE_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), "{}", message);
    } else {
        tracing::warn!(status = status.as_u16(), "{}", message);
    }

    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        .into_response()
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    // Body errors first: a POST rejection is combined with the GET route's
    // method mismatch on the same path. A body that is not JSON carries no
    // text, so it gets the same answer as a missing `text`.
    let response = if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON body: {}", e))
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some()
        || err.find::<warp::reject::LengthRequired>().is_some()
    {
        error_response(StatusCode::BAD_REQUEST, "Todo text is required")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else if err.is_not_found() {
        error_response(StatusCode::NOT_FOUND, "Not found")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(response)
}

fn log_request(info: warp::log::Info<'_>) {
    tracing::info!(
        method = %info.method(),
        path = info.path(),
        status = info.status().as_u16(),
        elapsed_ms = info.elapsed().as_millis() as u64,
        "request"
    );
}
