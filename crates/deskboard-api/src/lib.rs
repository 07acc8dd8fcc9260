//! HTTP API for the todo list.
//!
//! Routes are plain warp filters over a shared [`TodoService`]; see
//! [`routes`] for the endpoint table and [`serve`] to run them.
//!
//! [`TodoService`]: deskboard_services::TodoService

pub mod routes;
pub mod server;

pub use routes::routes;
pub use server::{serve, shutdown_signal};
