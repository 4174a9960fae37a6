use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, USERNAME_TAKEN_MESSAGE};
use crate::error::AppError;
use crate::models::{NewTodo, NewUser, Todo, User};

#[derive(Default)]
struct Tables {
    /// Keyed by username, which is unique.
    users: HashMap<String, User>,
    /// Kept in insertion order.
    todos: Vec<Todo>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn todo_count(&self) -> usize {
        self.tables.read().await.todos.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.username) {
            return Err(AppError::Conflict(USERNAME_TAKEN_MESSAGE.into()));
        }
        let user = User::new(user);
        tables.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, AppError> {
        let todo = Todo::new(todo);
        self.tables.write().await.todos.push(todo.clone());
        Ok(todo)
    }

    async fn mark_todo_done(&self, id: Uuid) -> Result<Todo, AppError> {
        let mut tables = self.tables.write().await;
        let todo = tables
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
        todo.done = true;
        Ok(todo.clone())
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.tables.read().await.todos.clone())
    }

    async fn close(&self) {}
}
