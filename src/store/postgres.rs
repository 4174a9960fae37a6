use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, USERNAME_TAKEN_MESSAGE};
use crate::error::AppError;
use crate::models::{NewTodo, NewUser, Todo, User};

const USER_COLUMNS: &str = "id, username, password_hash, firstname, lastname, created_at";
const TODO_COLUMNS: &str = "id, title, description, done, user_id, created_at";

/// Postgres-backed store. Owns the connection pool for the lifetime of the process.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Applies the embedded migrations under `./migrations`.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, password_hash, firstname, lastname)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Two concurrent signups can both pass the handler's existence check.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(USERNAME_TAKEN_MESSAGE.into())
            }
            other => other.into(),
        })
    }

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (id, title, description, done, user_id)
             VALUES ($1, $2, $3, FALSE, $4)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn mark_todo_done(&self, id: Uuid) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET done = TRUE WHERE id = $1 RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos ORDER BY created_at, id",
            TODO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
