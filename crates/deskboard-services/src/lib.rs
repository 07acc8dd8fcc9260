pub mod storage;
pub mod todo;
pub mod todo_client;
pub mod todo_list;
pub mod todo_service;

pub use storage::TodoStorage;
pub use todo::{Timer, TimerOutOfRange, Todo, TodoCreateRequest};
pub use todo_client::TodoClient;
pub use todo_list::{TodoError, TodoList, TodoResult};
pub use todo_service::TodoService;
