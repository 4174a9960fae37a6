use crate::{
    auth::{AuthMiddleware, AuthenticatedUser},
    error::AppError,
    models::{MarkCompleteInput, NewTodo, Todo, TodoInput},
    state::AppState,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const TODO_FIELDS_REQUIRED_MESSAGE: &str = "Title and description are required";

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub message: String,
    pub todo: Todo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub message: String,
    pub todos: Vec<Todo>,
}

/// Creates a new todo owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description`: required, non-empty.
/// - `status`: accepted and ignored. New todos always start with `done = false`.
///
/// ## Responses:
/// - `201 Created`: `{message, todo}`.
/// - `400 Bad Request`: Title or description missing, empty or not a string.
/// - `403 Forbidden`: Missing or invalid bearer token.
/// - `500 Internal Server Error`: Storage failure.
#[post("/addtodo", wrap = "AuthMiddleware")]
pub async fn add_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    todo_data: Result<web::Json<TodoInput>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let missing_fields = || AppError::Validation(TODO_FIELDS_REQUIRED_MESSAGE.into());
    let todo_data = todo_data.map_err(|_| missing_fields())?;
    todo_data.validate().map_err(|_| missing_fields())?;

    let todo = state
        .store
        .create_todo(NewTodo::new(todo_data.into_inner(), user.0.id))
        .await?;
    log::info!("user {} added todo {}", user.0.username, todo.id);

    Ok(HttpResponse::Created().json(TodoResponse {
        message: "Todo added successfully".into(),
        todo,
    }))
}

/// Marks a todo as done.
///
/// Re-marking an already completed todo succeeds and returns it unchanged.
///
/// ## Responses:
/// - `200 OK`: `{message, todo}` with `done = true`.
/// - `400 Bad Request`: `id` missing.
/// - `404 Not Found`: No todo with that id.
/// - `500 Internal Server Error`: Storage failure.
#[put("/markcomplete")]
pub async fn mark_complete(
    state: web::Data<AppState>,
    input: web::Json<MarkCompleteInput>,
) -> Result<impl Responder, AppError> {
    let id = input
        .id
        .ok_or_else(|| AppError::Validation("Todo ID is required".into()))?;

    let todo = state.store.mark_todo_done(id).await?;
    log::info!("todo {} marked as complete", todo.id);

    Ok(HttpResponse::Ok().json(TodoResponse {
        message: "Todo marked as complete".into(),
        todo,
    }))
}

/// Lists every todo, regardless of owner.
#[get("/todos")]
pub async fn list_todos(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let todos = state.store.list_todos().await?;

    Ok(HttpResponse::Ok().json(TodoListResponse {
        message: "Todos retrieved successfully".into(),
        todos,
    }))
}
