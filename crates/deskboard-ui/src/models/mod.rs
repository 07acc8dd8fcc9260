pub mod note_model;
pub mod todo_model;
pub mod weather_model;

pub use note_model::{Note, NoteModel};
pub use todo_model::TodoModel;
pub use weather_model::WeatherModel;
