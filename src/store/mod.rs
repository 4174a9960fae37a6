//! Data-access layer.
//!
//! Handlers only ever talk to the [`Store`] trait. `PgStore` is the production
//! backend; `MemoryStore` is used by tests and when no `DATABASE_URL` is set.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTodo, NewUser, Todo, User};

pub const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken";

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Inserts a user. A username collision is `AppError::Conflict`.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, AppError>;

    /// Sets `done = true` and returns the updated row. Re-applying is a no-op.
    /// An unknown id is `AppError::NotFound`.
    async fn mark_todo_done(&self, id: Uuid) -> Result<Todo, AppError>;

    /// Every todo regardless of owner, oldest first.
    async fn list_todos(&self) -> Result<Vec<Todo>, AppError>;

    /// Releases the backend's resources. Called once after the server stops.
    async fn close(&self);
}
