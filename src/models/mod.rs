pub mod todo;
pub mod user;

pub use todo::{MarkCompleteInput, NewTodo, Todo, TodoInput};
pub use user::{NewUser, User};
